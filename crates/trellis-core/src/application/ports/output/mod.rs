//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what synthesis needs from external systems.
//! The `trellis-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::Permissions;
use crate::error::TrellisResult;

/// Directory names [`Filesystem::list_files`] never descends into.
pub const SKIPPED_DIRS: &[&str] = &[".git", "node_modules"];

/// Port for filesystem operations.
///
/// Implemented by:
/// - `trellis_adapters::filesystem::LocalFilesystem` (production)
/// - `trellis_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Paths are absolute; resolution happens in `SynthContext`
/// - Permissions are capability-based, not Unix-specific
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> TrellisResult<()>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> TrellisResult<()>;

    /// Read a whole file as UTF-8.
    fn read_file(&self, path: &Path) -> TrellisResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> TrellisResult<()>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, permissions: Permissions) -> TrellisResult<()>;

    /// Every file below `dir`, recursively, sorted. Directories named in
    /// [`SKIPPED_DIRS`] are not entered. Empty if `dir` does not exist.
    fn list_files(&self, dir: &Path) -> TrellisResult<Vec<PathBuf>>;
}

/// Port for removing stale output of a previous run.
///
/// Implemented by:
/// - `trellis_adapters::cleanup::ManifestCleanup` (file list per project)
#[cfg_attr(test, mockall::automock)]
pub trait Cleanup: Send + Sync {
    /// Remove every file generated by a previous run below `outdir`,
    /// including the output of nested projects. Files that were never
    /// generated must survive. A missing `outdir` is not an error.
    fn cleanup(&self, outdir: &Path) -> TrellisResult<()>;

    /// Remember `files` as generated for `outdir`, so the next
    /// [`Cleanup::cleanup`] can remove them.
    fn track(&self, outdir: &Path, files: &[PathBuf]) -> TrellisResult<()>;
}
