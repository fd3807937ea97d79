//! Infrastructure adapters for Trellis.
//!
//! This crate implements the ports defined in `trellis-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod cleanup;
pub mod filesystem;

// Re-export commonly used adapters
pub use cleanup::ManifestCleanup;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
