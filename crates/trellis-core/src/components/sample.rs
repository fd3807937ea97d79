//! Sample files: starter content that belongs to the user once written.
//!
//! Samples are written only when absent, are never tracked for cleanup and
//! are not file components, so they never show up in `files()`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use crate::application::SynthContext;
use crate::domain::{Component, DomainError, ReadmeOptions, RelativePath};
use crate::error::TrellisResult;

/// A single sample file.
#[derive(Debug, Clone)]
pub struct SampleFile {
    path: RelativePath,
    contents: String,
}

impl SampleFile {
    /// # Panics
    /// Panics if `path` is absolute, escapes the project or is empty.
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: RelativePath::file(path),
            contents: contents.into(),
        }
    }

    pub fn try_new(
        path: impl Into<PathBuf>,
        contents: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            path: RelativePath::try_file(path)?,
            contents: contents.into(),
        })
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }
}

impl Component for SampleFile {
    fn name(&self) -> &str {
        "SampleFile"
    }

    fn synthesize(&mut self, ctx: &mut SynthContext<'_>) -> TrellisResult<()> {
        ctx.write_sample(&self.path, &self.contents)?;
        Ok(())
    }
}

/// The placeholder readme every project gets.
#[derive(Debug, Clone)]
pub struct SampleReadme {
    inner: SampleFile,
}

impl SampleReadme {
    pub fn new(options: ReadmeOptions) -> Self {
        Self {
            inner: SampleFile::new(options.filename, options.contents),
        }
    }
}

impl Component for SampleReadme {
    fn name(&self) -> &str {
        "SampleReadme"
    }

    fn synthesize(&mut self, ctx: &mut SynthContext<'_>) -> TrellisResult<()> {
        self.inner.synthesize(ctx)
    }
}

/// A sample directory. Nothing is written if the directory already exists,
/// so deleting one of its files by hand is respected.
#[derive(Debug, Clone)]
pub struct SampleDir {
    dir: RelativePath,
    files: BTreeMap<String, String>,
}

impl SampleDir {
    /// # Panics
    /// Panics if `dir` is absolute or escapes the project.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: RelativePath::new(dir),
            files: BTreeMap::new(),
        }
    }

    pub fn with_file(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.insert(name.into(), contents.into());
        self
    }
}

impl Component for SampleDir {
    fn name(&self) -> &str {
        "SampleDir"
    }

    fn synthesize(&mut self, ctx: &mut SynthContext<'_>) -> TrellisResult<()> {
        if ctx.exists(&self.dir) {
            debug!(dir = %self.dir, "Sample directory exists, skipping");
            return Ok(());
        }

        if self.files.is_empty() {
            ctx.filesystem().create_dir_all(&ctx.resolve(&self.dir))?;
            return Ok(());
        }

        for (name, contents) in &self.files {
            let path = self.dir.join(name)?;
            ctx.write_sample(&path, contents)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_file_try_new_validates_path() {
        let sample = SampleFile::try_new("./src/main.rs", "fn main() {}").unwrap();
        assert_eq!(sample.path().as_path(), std::path::Path::new("src/main.rs"));

        assert!(matches!(
            SampleFile::try_new("../x", ""),
            Err(DomainError::PathEscapesProject { .. })
        ));
        assert!(matches!(
            SampleFile::try_new(".", ""),
            Err(DomainError::NotAFilePath { .. })
        ));
    }
}
