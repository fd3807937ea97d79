//! Per-project view handed to components during synthesis.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::application::ports::Filesystem;
use crate::domain::{Permissions, ProjectId, RelativePath, paths::resolve};
use crate::error::TrellisResult;

/// How a generated file is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOptions {
    /// Generated files are read-only unless told otherwise, so edits go
    /// through the project definition instead of the output.
    pub readonly: bool,
    pub executable: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            readonly: true,
            executable: false,
        }
    }
}

impl FileOptions {
    pub fn permissions(&self) -> Permissions {
        Permissions::new(!self.readonly, self.executable)
    }
}

/// Synthesis context scoped to one project.
///
/// Paths handed to [`SynthContext::write_file`] are relative to the
/// project's outdir; every file written that way is recorded and later
/// reported to the cleanup collaborator.
pub struct SynthContext<'a> {
    project: ProjectId,
    outdir: &'a Path,
    filesystem: &'a dyn Filesystem,
    generated: &'a mut Vec<PathBuf>,
}

impl<'a> SynthContext<'a> {
    pub fn new(
        project: ProjectId,
        outdir: &'a Path,
        filesystem: &'a dyn Filesystem,
        generated: &'a mut Vec<PathBuf>,
    ) -> Self {
        Self {
            project,
            outdir,
            filesystem,
            generated,
        }
    }

    pub fn project(&self) -> ProjectId {
        self.project
    }

    /// Absolute outdir of the owning project.
    pub fn outdir(&self) -> &Path {
        self.outdir
    }

    /// Resolve a path against the owning project's outdir.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        resolve(self.outdir, path.as_ref())
    }

    pub fn filesystem(&self) -> &dyn Filesystem {
        self.filesystem
    }

    /// Write a generated file and record it for cleanup.
    pub fn write_file(
        &mut self,
        path: &RelativePath,
        content: &str,
        options: FileOptions,
    ) -> TrellisResult<PathBuf> {
        let absolute = self.outdir.join(path);
        if let Some(parent) = absolute.parent() {
            self.filesystem.create_dir_all(parent)?;
        }

        // A read-only file from the previous run must be unlocked first.
        if self.filesystem.exists(&absolute) {
            self.filesystem
                .set_permissions(&absolute, Permissions::read_write())?;
        }

        self.filesystem.write_file(&absolute, content)?;
        self.filesystem
            .set_permissions(&absolute, options.permissions())?;

        debug!(project = %self.project, path = %absolute.display(), "Generated file");
        self.generated.push(absolute.clone());
        Ok(absolute)
    }

    /// Write a sample file once. Samples belong to the user after the first
    /// run, so they are never tracked and never overwritten.
    ///
    /// Returns `true` if the file was written.
    pub fn write_sample(&mut self, path: &RelativePath, content: &str) -> TrellisResult<bool> {
        let absolute = self.outdir.join(path);
        if self.filesystem.exists(&absolute) {
            trace!(path = %absolute.display(), "Sample exists, skipping");
            return Ok(false);
        }

        if let Some(parent) = absolute.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&absolute, content)?;
        debug!(project = %self.project, path = %absolute.display(), "Sample file created");
        Ok(true)
    }

    /// Read any file, relative paths resolve against the project's outdir.
    pub fn read_file(&self, path: impl AsRef<Path>) -> TrellisResult<String> {
        self.filesystem.read_file(&self.resolve(path))
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.filesystem.exists(&self.resolve(path))
    }

    /// Files generated for this project so far in the current run.
    pub fn generated(&self) -> &[PathBuf] {
        self.generated
    }
}
