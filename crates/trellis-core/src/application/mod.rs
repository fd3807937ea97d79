//! Application layer for Trellis.
//!
//! This layer contains:
//! - **Services**: The synthesis driver ([`SynthService`])
//! - **Context**: The per-project view components write through ([`SynthContext`])
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Failures raised while synthesizing
//!
//! Tree-construction rules live in `crate::domain`; this layer only walks
//! an already valid tree.

pub mod context;
pub mod error;
pub mod ports;
pub mod services;

pub use context::{FileOptions, SynthContext};
pub use services::{SynthReport, SynthService};

// Re-export port traits (for adapter implementation)
pub use ports::{Cleanup, Filesystem};

pub use error::ApplicationError;
