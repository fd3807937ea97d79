//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `trellis-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the synthesis driver, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `Cleanup`: Stale-output removal and generated-file tracking

pub mod output;

pub use output::{Cleanup, Filesystem, SKIPPED_DIRS};
