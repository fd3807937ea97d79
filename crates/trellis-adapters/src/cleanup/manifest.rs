//! File-list based cleanup.
//!
//! Every synthesized project leaves `.trellis/files.json` in its outdir,
//! listing the files it generated relative to that outdir. The next run
//! removes exactly those files, so anything the user created survives.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use trellis_core::{
    application::{
        ApplicationError,
        ports::{Cleanup, Filesystem},
    },
    domain::{Permissions, RelativePath},
    error::TrellisResult,
};

pub const MANIFEST_DIR: &str = ".trellis";
pub const MANIFEST_FILE: &str = "files.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Manifest {
    files: Vec<String>,
}

/// [`Cleanup`] backed by one manifest per project directory.
#[derive(Debug, Clone)]
pub struct ManifestCleanup<F> {
    filesystem: F,
}

impl<F: Filesystem> ManifestCleanup<F> {
    pub fn new(filesystem: F) -> Self {
        Self { filesystem }
    }

    /// Where the manifest for `outdir` lives.
    pub fn manifest_path(outdir: &Path) -> PathBuf {
        outdir.join(MANIFEST_DIR).join(MANIFEST_FILE)
    }

    fn is_manifest(path: &Path) -> bool {
        path.file_name().is_some_and(|n| n == MANIFEST_FILE)
            && path
                .parent()
                .and_then(Path::file_name)
                .is_some_and(|n| n == MANIFEST_DIR)
    }

    /// Delete every file listed in `manifest`, then the manifest itself.
    fn remove_listed(&self, manifest: &Path) -> TrellisResult<usize> {
        let Some(project_dir) = manifest.parent().and_then(Path::parent) else {
            return Ok(0);
        };

        let content = self.filesystem.read_file(manifest)?;
        let parsed: Manifest =
            serde_json::from_str(&content).map_err(|e| ApplicationError::ManifestCorrupt {
                path: manifest.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut removed = 0;
        for entry in &parsed.files {
            let relative = match RelativePath::try_new(entry) {
                Ok(relative) if !relative.is_empty() => relative,
                Ok(_) | Err(_) => {
                    warn!(manifest = %manifest.display(), entry = %entry, "Ignoring manifest entry outside its project");
                    continue;
                }
            };

            let path = project_dir.join(relative);
            if !self.filesystem.exists(&path) {
                continue;
            }
            self.filesystem
                .set_permissions(&path, Permissions::read_write())?;
            self.filesystem.remove_file(&path)?;
            removed += 1;
        }

        self.filesystem.remove_file(manifest)?;
        debug!(manifest = %manifest.display(), removed, "Stale files removed");
        Ok(removed)
    }
}

impl<F: Filesystem> Cleanup for ManifestCleanup<F> {
    #[instrument(skip(self), fields(outdir = %outdir.display()))]
    fn cleanup(&self, outdir: &Path) -> TrellisResult<()> {
        if !self.filesystem.exists(outdir) {
            debug!("Outdir does not exist yet, nothing to clean");
            return Ok(());
        }

        let manifests: Vec<PathBuf> = self
            .filesystem
            .list_files(outdir)?
            .into_iter()
            .filter(|path| Self::is_manifest(path))
            .collect();

        let mut removed = 0;
        for manifest in &manifests {
            removed += self.remove_listed(manifest)?;
        }

        if removed > 0 {
            info!(removed, manifests = manifests.len(), "Cleaned up previous output");
        }
        Ok(())
    }

    #[instrument(skip(self, files), fields(outdir = %outdir.display(), files = files.len()))]
    fn track(&self, outdir: &Path, files: &[PathBuf]) -> TrellisResult<()> {
        let mut manifest = Manifest::default();
        for file in files {
            match file.strip_prefix(outdir) {
                Ok(relative) => manifest
                    .files
                    .push(relative.to_string_lossy().replace('\\', "/")),
                Err(_) => warn!(file = %file.display(), "Generated file outside outdir is not tracked"),
            }
        }
        manifest.files.sort();
        manifest.files.dedup();

        let path = Self::manifest_path(outdir);
        let mut content =
            serde_json::to_string_pretty(&manifest).map_err(|e| ApplicationError::RenderingFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        content.push('\n');

        self.filesystem.create_dir_all(&outdir.join(MANIFEST_DIR))?;
        self.filesystem.write_file(&path, &content)?;
        debug!(manifest = %path.display(), "Generated files tracked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryFilesystem;

    fn write(fs: &MemoryFilesystem, path: &str, content: &str) {
        let path = Path::new(path);
        fs.create_dir_all(path.parent().unwrap()).unwrap();
        fs.write_file(path, content).unwrap();
    }

    #[test]
    fn track_then_cleanup_removes_only_tracked_files() {
        let fs = MemoryFilesystem::new();
        let cleanup = ManifestCleanup::new(fs.clone());
        write(&fs, "/out/gen.txt", "generated");
        write(&fs, "/out/NOTES.txt", "mine");
        fs.set_permissions(Path::new("/out/gen.txt"), Permissions::read_only())
            .unwrap();

        cleanup
            .track(Path::new("/out"), &[PathBuf::from("/out/gen.txt")])
            .unwrap();
        let manifest = fs.contents(Path::new("/out/.trellis/files.json")).unwrap();
        assert!(manifest.contains("\"gen.txt\""));

        cleanup.cleanup(Path::new("/out")).unwrap();
        assert!(!fs.exists(Path::new("/out/gen.txt")));
        assert!(!fs.exists(Path::new("/out/.trellis/files.json")));
        assert!(fs.exists(Path::new("/out/NOTES.txt")));
    }

    #[test]
    fn cleanup_reaches_nested_project_manifests() {
        let fs = MemoryFilesystem::new();
        let cleanup = ManifestCleanup::new(fs.clone());
        write(&fs, "/out/pkg/inner.txt", "x");
        cleanup
            .track(Path::new("/out/pkg"), &[PathBuf::from("/out/pkg/inner.txt")])
            .unwrap();

        cleanup.cleanup(Path::new("/out")).unwrap();
        assert!(!fs.exists(Path::new("/out/pkg/inner.txt")));
    }

    #[test]
    fn missing_outdir_is_not_an_error() {
        let cleanup = ManifestCleanup::new(MemoryFilesystem::new());
        cleanup.cleanup(Path::new("/nowhere")).unwrap();
    }

    #[test]
    fn corrupt_manifest_fails() {
        let fs = MemoryFilesystem::new();
        write(&fs, "/out/.trellis/files.json", "{not json");
        let err = ManifestCleanup::new(fs).cleanup(Path::new("/out")).unwrap_err();
        assert!(err.to_string().contains("Corrupt cleanup manifest"));
    }

    #[test]
    fn escaping_entries_are_ignored() {
        let fs = MemoryFilesystem::new();
        write(&fs, "/victim.txt", "keep");
        write(&fs, "/out/.trellis/files.json", r#"{"files": ["../victim.txt", "/victim.txt"]}"#);

        ManifestCleanup::new(fs.clone())
            .cleanup(Path::new("/out"))
            .unwrap();
        assert!(fs.exists(Path::new("/victim.txt")));
        assert!(!fs.exists(Path::new("/out/.trellis/files.json")));
    }

    #[test]
    fn files_outside_outdir_are_not_tracked() {
        let fs = MemoryFilesystem::new();
        ManifestCleanup::new(fs.clone())
            .track(
                Path::new("/out"),
                &[PathBuf::from("/out/b.txt"), PathBuf::from("/elsewhere/a.txt"), PathBuf::from("/out/a.txt")],
            )
            .unwrap();
        let manifest = fs.contents(Path::new("/out/.trellis/files.json")).unwrap();
        let parsed: Manifest = serde_json::from_str(&manifest).unwrap();
        assert_eq!(parsed.files, vec!["a.txt", "b.txt"]);
    }
}
