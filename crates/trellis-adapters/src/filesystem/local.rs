//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;
use trellis_core::{
    application::ports::{Filesystem, SKIPPED_DIRS},
    domain::Permissions,
    error::TrellisResult,
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> TrellisResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> TrellisResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> TrellisResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, path: &Path) -> TrellisResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn set_permissions(&self, path: &Path, permissions: Permissions) -> TrellisResult<()> {
        let metadata =
            std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
        let mut perms = metadata.permissions();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut mode = perms.mode();
            if permissions.writable() {
                mode |= 0o200;
            } else {
                mode &= !0o222;
            }
            if permissions.executable() {
                mode |= 0o111;
            } else {
                mode &= !0o111;
            }
            perms.set_mode(mode);
        }
        #[cfg(not(unix))]
        {
            // No executable bit outside unix.
            perms.set_readonly(!permissions.writable());
        }

        trace!(path = %path.display(), ?permissions, "Setting permissions");
        std::fs::set_permissions(path, perms).map_err(|e| map_io_error(path, e, "set permissions"))
    }

    fn list_files(&self, dir: &Path) -> TrellisResult<Vec<PathBuf>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let walker = WalkDir::new(dir).sort_by_file_name().into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !SKIPPED_DIRS.iter().any(|skip| entry.file_name() == *skip)
        });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                map_io_error(&path, io::Error::other(e), "walk directory")
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> trellis_core::error::TrellisError {
    use trellis_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn list_files_skips_vcs_and_dependencies() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        for path in ["a.txt", "sub/b.txt", ".git/HEAD", "node_modules/x/index.js"] {
            let path = temp.path().join(path);
            fs.create_dir_all(path.parent().unwrap()).unwrap();
            fs.write_file(&path, "x").unwrap();
        }

        let files = fs.list_files(temp.path()).unwrap();
        assert_eq!(
            files,
            vec![temp.path().join("a.txt"), temp.path().join("sub/b.txt")]
        );
    }

    #[test]
    fn list_files_of_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        assert!(fs.list_files(&temp.path().join("nope")).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn read_only_and_executable_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = temp.path().join("run.sh");
        fs.write_file(&path, "#!/bin/sh\n").unwrap();

        fs.set_permissions(&path, Permissions::new(false, true)).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o222, 0);
        assert_eq!(mode & 0o111, 0o111);

        fs.set_permissions(&path, Permissions::read_write()).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_ne!(mode & 0o200, 0);
        assert_eq!(mode & 0o111, 0);
    }

    #[test]
    fn read_missing_file_is_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_file(&temp.path().join("missing"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
