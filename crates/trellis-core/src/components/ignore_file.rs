//! Ignore files (`.gitignore`, `.npmignore`, ...).

use std::path::PathBuf;

use crate::application::{FileOptions, SynthContext};
use crate::components::GENERATED_MARKER;
use crate::domain::{Component, ComponentKind, RelativePath};
use crate::error::TrellisResult;

/// An ignore file built from exclude/include patterns.
///
/// Patterns are kept in insertion order. Adding a pattern drops its
/// opposite (`x` vs `!x`) and ignores exact repeats. Lines starting with `#`
/// are comments and are always appended.
#[derive(Debug, Clone)]
pub struct IgnoreFile {
    path: RelativePath,
    patterns: Vec<String>,
    options: FileOptions,
}

impl IgnoreFile {
    /// # Panics
    /// Panics if `path` is absolute or escapes the project.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: RelativePath::new(path),
            patterns: Vec::new(),
            options: FileOptions::default(),
        }
    }

    /// Ignore everything matching `patterns`.
    pub fn exclude<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in patterns {
            self.add_pattern(pattern.into());
        }
    }

    /// Un-ignore everything matching `patterns`.
    pub fn include<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in patterns {
            let pattern = pattern.into();
            let pattern = pattern.trim();
            if pattern.is_empty() {
                continue;
            }
            let negated = match pattern.strip_prefix('!') {
                Some(_) => pattern.to_string(),
                None => format!("!{pattern}"),
            };
            self.add_pattern(negated);
        }
    }

    /// Forget `patterns` entirely.
    pub fn remove<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            self.patterns.retain(|p| p != pattern);
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    fn add_pattern(&mut self, pattern: String) {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return;
        }
        if pattern.starts_with('#') {
            self.patterns.push(pattern.to_string());
            return;
        }

        let opposite = match pattern.strip_prefix('!') {
            Some(rest) => rest.to_string(),
            None => format!("!{pattern}"),
        };
        self.patterns.retain(|p| *p != opposite);

        if !self.patterns.iter().any(|p| p == pattern) {
            self.patterns.push(pattern.to_string());
        }
    }

    fn render(&self) -> String {
        let mut content = format!("# {GENERATED_MARKER}\n");
        for pattern in &self.patterns {
            content.push_str(pattern);
            content.push('\n');
        }
        content
    }
}

impl Component for IgnoreFile {
    fn name(&self) -> &str {
        "IgnoreFile"
    }

    fn kind(&self) -> ComponentKind<'_> {
        ComponentKind::File(&self.path)
    }

    fn synthesize(&mut self, ctx: &mut SynthContext<'_>) -> TrellisResult<()> {
        let content = self.render();
        ctx.write_file(&self.path, &content, self.options)?;
        Ok(())
    }
}
