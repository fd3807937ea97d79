//! Application layer errors.
//!
//! These errors represent failures while synthesizing, not tree-construction
//! violations. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during synthesis.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A cleanup manifest could not be read back.
    #[error("Corrupt cleanup manifest at {path}: {reason}")]
    ManifestCorrupt { path: PathBuf, reason: String },

    /// A component reported a failure of its own.
    #[error("Component '{component}' failed: {reason}")]
    ComponentFailed { component: String, reason: String },

    /// Serialising a generated file failed.
    #[error("Rendering {path} failed: {reason}")]
    RenderingFailed { path: PathBuf, reason: String },

    /// Adapter lock poisoned.
    #[error("Filesystem adapter lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure no other process holds the file open".into(),
            ],
            Self::ManifestCorrupt { path, .. } => vec![
                format!("The file list at {} is unreadable", path.display()),
                "Delete it and re-run synthesis; previously generated files may need manual removal"
                    .into(),
            ],
            Self::ComponentFailed { component, .. } => vec![
                format!("Check the configuration of '{}'", component),
                "Re-run with -vv to see which phase failed".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::ManifestCorrupt { .. } => ErrorCategory::Configuration,
            Self::ComponentFailed { .. } | Self::RenderingFailed { .. } => {
                ErrorCategory::Validation
            }
        }
    }
}
