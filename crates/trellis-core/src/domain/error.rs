// ============================================================================
// domain/error.rs - TREE CONSTRUCTION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (cheap to carry through reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Every variant is raised synchronously while the project tree is being
/// built; none of them can occur during synthesis.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Output directory invariants
    // ========================================================================
    #[error("invalid outdir '{outdir}': {reason}")]
    InvalidOutdir { outdir: String, reason: String },

    #[error("cannot use outdir '{outdir}' because .trellisrc.toml does not exist there")]
    UnsafeRootOutdir { outdir: String },

    #[error("there is already a sub-project with outdir: {outdir}")]
    DuplicateOutdir { outdir: String },

    #[error("parent of child project must be {expected}, but it declares {declared}")]
    ParentMismatch { expected: String, declared: String },

    // ========================================================================
    // Path invariants
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path '{path}' escapes the project directory")]
    PathEscapesProject { path: String },

    #[error("Path '{path}' names the project directory, not a file")]
    NotAFilePath { path: String },

    // ========================================================================
    // Arena lookups
    // ========================================================================
    #[error("No project with id #{0}")]
    UnknownProject(usize),

    #[error("No component #{index} in project #{project}")]
    UnknownComponent { project: usize, index: usize },

    #[error("Component #{index} in project #{project} is not a {expected}")]
    ComponentTypeMismatch {
        project: usize,
        index: usize,
        expected: &'static str,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidOutdir { outdir, .. } => vec![
                format!("Sub-project outdir '{}' was rejected", outdir),
                "Sub-projects need a relative outdir below their parent, e.g. \"packages/api\"".into(),
            ],
            Self::UnsafeRootOutdir { outdir } => vec![
                format!("Refusing to synthesize into {} without a bootstrap marker", outdir),
                "Run: trellis init".into(),
                "Or point the root project at a dedicated outdir".into(),
            ],
            Self::DuplicateOutdir { outdir } => vec![
                format!("Two sibling sub-projects resolve to {}", outdir),
                "Give each sub-project its own outdir".into(),
            ],
            Self::ParentMismatch { .. } => vec![
                "Attach the sub-project under the project it declares as parent".into(),
            ],
            Self::AbsolutePathNotAllowed { path }
            | Self::PathEscapesProject { path }
            | Self::NotAFilePath { path } => vec![
                format!("Rejected path: {}", path),
                "File paths are relative to the owning project's outdir".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidOutdir { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesProject { .. }
            | Self::NotAFilePath { .. } => ErrorCategory::Validation,
            Self::UnsafeRootOutdir { .. } => ErrorCategory::Safety,
            Self::DuplicateOutdir { .. } | Self::ParentMismatch { .. } => {
                ErrorCategory::Conflict
            }
            Self::UnknownProject(_) | Self::UnknownComponent { .. } => ErrorCategory::NotFound,
            Self::ComponentTypeMismatch { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Safety,
    Conflict,
    NotFound,
    Internal,
}
