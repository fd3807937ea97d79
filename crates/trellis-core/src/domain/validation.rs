use std::path::{Path, PathBuf};

use crate::domain::{
    error::DomainError,
    paths::{is_strictly_under, resolve},
};

/// Centralized outdir validation.
///
/// All outdir rules live here, not scattered across the tree.
pub struct OutdirValidator;

impl OutdirValidator {
    /// Resolve a sub-project's outdir against its parent's.
    ///
    /// The outdir must be given, must be relative and must resolve strictly
    /// below `parent`.
    pub fn subproject_outdir(parent: &Path, outdir: Option<&Path>) -> Result<PathBuf, DomainError> {
        let outdir = match outdir {
            Some(o) if !o.as_os_str().is_empty() => o,
            _ => {
                return Err(DomainError::InvalidOutdir {
                    outdir: String::new(),
                    reason: "outdir must be specified for sub-projects".into(),
                });
            }
        };

        if outdir.is_absolute() || outdir.has_root() {
            return Err(DomainError::InvalidOutdir {
                outdir: outdir.display().to_string(),
                reason: "outdir must be a relative path".into(),
            });
        }

        let resolved = resolve(parent, outdir);
        if !is_strictly_under(&resolved, parent) {
            return Err(DomainError::InvalidOutdir {
                outdir: outdir.display().to_string(),
                reason: format!("must resolve below the parent outdir {}", parent.display()),
            });
        }

        Ok(resolved)
    }

    /// Fail if `outdir` equals, contains or lies inside a sibling's outdir.
    /// Sibling directories must be disjoint: a parent cleaning its own
    /// output would otherwise remove what a nested sibling just generated.
    pub fn exclusive<'a>(
        outdir: &Path,
        siblings: impl Iterator<Item = &'a Path>,
    ) -> Result<(), DomainError> {
        for sibling in siblings {
            if sibling == outdir {
                return Err(DomainError::DuplicateOutdir {
                    outdir: outdir.display().to_string(),
                });
            }
            if is_strictly_under(outdir, sibling) || is_strictly_under(sibling, outdir) {
                return Err(DomainError::InvalidOutdir {
                    outdir: outdir.display().to_string(),
                    reason: format!("overlaps sibling outdir {}", sibling.display()),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_nested_outdir() {
        let out = OutdirValidator::subproject_outdir(Path::new("/r"), Some(Path::new("a/./b")))
            .unwrap();
        assert_eq!(out, PathBuf::from("/r/a/b"));
    }

    #[test]
    fn empty_outdir_is_invalid() {
        assert!(OutdirValidator::subproject_outdir(Path::new("/r"), Some(Path::new(""))).is_err());
        assert!(OutdirValidator::subproject_outdir(Path::new("/r"), None).is_err());
    }

    #[test]
    fn exclusive_detects_duplicates() {
        let siblings = [PathBuf::from("/r/a"), PathBuf::from("/r/b")];
        assert!(
            OutdirValidator::exclusive(Path::new("/r/c"), siblings.iter().map(|p| p.as_path()))
                .is_ok()
        );
        assert!(matches!(
            OutdirValidator::exclusive(Path::new("/r/b"), siblings.iter().map(|p| p.as_path())),
            Err(DomainError::DuplicateOutdir { .. })
        ));
    }

    #[test]
    fn exclusive_rejects_nested_siblings() {
        let siblings = [PathBuf::from("/r/a/b")];
        assert!(matches!(
            OutdirValidator::exclusive(Path::new("/r/a"), siblings.iter().map(|p| p.as_path())),
            Err(DomainError::InvalidOutdir { .. })
        ));

        let siblings = [PathBuf::from("/r/a")];
        assert!(matches!(
            OutdirValidator::exclusive(Path::new("/r/a/b"), siblings.iter().map(|p| p.as_path())),
            Err(DomainError::InvalidOutdir { .. })
        ));
    }

    #[test]
    fn exclusive_allows_prefix_named_siblings() {
        let siblings = [PathBuf::from("/r/app")];
        assert!(
            OutdirValidator::exclusive(Path::new("/r/app2"), siblings.iter().map(|p| p.as_path()))
                .is_ok()
        );
    }
}
