use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::DomainError;

/// A filesystem path guaranteed to be relative and to stay inside the
/// directory it is joined onto.
///
/// Invariant: never absolute, never climbs above its base with `..`.
/// Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if path is absolute or escapes its base (use `try_new` for fallible).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        match Self::try_new(path) {
            Ok(p) => p,
            Err(e) => panic!("invalid RelativePath: {e}"),
        }
    }

    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() || path.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }

        let normalized = normalize(&path);
        if normalized
            .components()
            .next()
            .is_some_and(|c| matches!(c, Component::ParentDir))
        {
            return Err(DomainError::PathEscapesProject {
                path: path.display().to_string(),
            });
        }

        Ok(Self(normalized))
    }

    /// Like [`RelativePath::new`], for paths that must name a file.
    ///
    /// # Panics
    /// Panics where [`RelativePath::try_file`] fails.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        match Self::try_file(path) {
            Ok(p) => p,
            Err(e) => panic!("invalid file path: {e}"),
        }
    }

    /// [`RelativePath::try_new`], additionally rejecting paths that
    /// normalize to the base directory itself (`""`, `"."`, `"a/.."`).
    pub fn try_file(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let relative = Self::try_new(&path)?;
        if relative.is_empty() {
            return Err(DomainError::NotAFilePath {
                path: path.display().to_string(),
            });
        }
        Ok(relative)
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::try_new(self.0.join(segment.as_ref()))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// `true` for `"."` / `""`, i.e. the base directory itself.
    pub fn is_empty(&self) -> bool {
        self.0.as_os_str().is_empty()
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Lexically normalise a path: drop `.` segments and fold `..` into the
/// preceding segment. Never touches the filesystem, so symlinks are not
/// resolved.
///
/// Leading `..` segments on a relative path are kept; on an absolute path
/// they are dropped (`/..` is `/`).
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve `path` against `base` the way a shell would: absolute paths win,
/// relative ones are joined. The result is normalised.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// `true` when `child` lies below `parent` and is not `parent` itself.
pub fn is_strictly_under(child: &Path, parent: &Path) -> bool {
    child != parent && child.starts_with(parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_dots() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("a/b/..")), PathBuf::from("a"));
        assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn resolve_prefers_absolute() {
        assert_eq!(
            resolve(Path::new("/root"), Path::new("/other/file")),
            PathBuf::from("/other/file")
        );
        assert_eq!(
            resolve(Path::new("/root"), Path::new("pkg/../lib")),
            PathBuf::from("/root/lib")
        );
    }

    #[test]
    fn relative_path_rejects_absolute() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn relative_path_rejects_escape() {
        assert!(matches!(
            RelativePath::try_new("a/../../b"),
            Err(DomainError::PathEscapesProject { .. })
        ));
        assert!(RelativePath::try_new("a/../b").is_ok());
    }

    #[test]
    fn file_path_must_not_be_the_base() {
        for path in ["", ".", "a/.."] {
            assert!(
                matches!(
                    RelativePath::try_file(path),
                    Err(DomainError::NotAFilePath { .. })
                ),
                "{path:?} should be rejected"
            );
        }
        assert!(RelativePath::try_new(".").unwrap().is_empty());
        assert_eq!(
            RelativePath::try_file("./a.txt").unwrap().as_path(),
            Path::new("a.txt")
        );
    }

    #[test]
    fn relative_path_join() {
        let base = RelativePath::new(".vscode");
        assert_eq!(
            base.join("launch.json").unwrap().as_path(),
            Path::new(".vscode/launch.json")
        );
        assert!(base.join("/abs").is_err());
    }

    #[test]
    fn strictly_under() {
        assert!(is_strictly_under(Path::new("/a/b"), Path::new("/a")));
        assert!(!is_strictly_under(Path::new("/a"), Path::new("/a")));
        assert!(!is_strictly_under(Path::new("/ab"), Path::new("/a")));
    }
}
