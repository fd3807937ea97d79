//! Generated files: plain text, JSON and YAML.

use std::path::PathBuf;

use serde_json::{Map, Value as JsonValue};

use crate::application::{ApplicationError, FileOptions, SynthContext};
use crate::components::GENERATED_MARKER;
use crate::domain::{Component, ComponentKind, DomainError, RelativePath};
use crate::error::TrellisResult;

/// A text file assembled from lines.
///
/// No marker is added; the content is written exactly as given, plus a
/// trailing newline.
#[derive(Debug, Clone)]
pub struct TextFile {
    path: RelativePath,
    lines: Vec<String>,
    options: FileOptions,
}

impl TextFile {
    /// # Panics
    /// Panics if `path` is absolute, escapes the project or names the
    /// project directory itself (use `try_new`).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_path(RelativePath::file(path))
    }

    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        Ok(Self::from_path(RelativePath::try_file(path)?))
    }

    fn from_path(path: RelativePath) -> Self {
        Self {
            path,
            lines: Vec::new(),
            options: FileOptions::default(),
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn with_options(mut self, options: FileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut content = self.lines.join("\n");
        content.push('\n');
        content
    }
}

impl Component for TextFile {
    fn name(&self) -> &str {
        "TextFile"
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

/// A JSON document. Objects get a `"//"` key carrying the generated marker.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: RelativePath,
    value: JsonValue,
    marker: bool,
    options: FileOptions,
}

impl JsonFile {
    /// # Panics
    /// Panics if `path` is absolute, escapes the project or names the
    /// project directory itself (use `try_new`).
    pub fn new(path: impl Into<PathBuf>, value: JsonValue) -> Self {
        Self {
            path: RelativePath::file(path),
            value,
            marker: true,
            options: FileOptions::default(),
        }
    }

    pub fn try_new(path: impl Into<PathBuf>, value: JsonValue) -> Result<Self, DomainError> {
        Ok(Self {
            path: RelativePath::try_file(path)?,
            value,
            marker: true,
            options: FileOptions::default(),
        })
    }

    pub fn without_marker(mut self) -> Self {
        self.marker = false;
        self
    }

    pub fn with_options(mut self, options: FileOptions) -> Self {
        self.options = options;
        self
    }

    /// Set a top-level key. A non-object document is replaced by an object.
    pub fn set(&mut self, key: impl Into<String>, value: JsonValue) {
        if !self.value.is_object() {
            self.value = JsonValue::Object(Map::new());
        }
        if let JsonValue::Object(map) = &mut self.value {
            map.insert(key.into(), value);
        }
    }

    pub fn value(&self) -> &JsonValue {
        &self.value
    }

    fn render(&self) -> TrellisResult<String> {
        let mut value = self.value.clone();
        if self.marker {
            if let JsonValue::Object(map) = &mut value {
                map.insert("//".into(), JsonValue::String(GENERATED_MARKER.into()));
            }
        }

        let mut content =
            serde_json::to_string_pretty(&value).map_err(|e| ApplicationError::RenderingFailed {
                path: self.path.clone().into_path_buf(),
                reason: e.to_string(),
            })?;
        content.push('\n');
        Ok(content)
    }
}

impl Component for JsonFile {
    fn name(&self) -> &str {
        "JsonFile"
    }

    fn kind(&self) -> ComponentKind<'_> {
        ComponentKind::File(&self.path)
    }

    fn synthesize(&mut self, ctx: &mut SynthContext<'_>) -> TrellisResult<()> {
        let content = self.render()?;
        ctx.write_file(&self.path, &content, self.options)?;
        Ok(())
    }
}

/// A YAML document, prefixed with the generated marker as a comment.
#[derive(Debug, Clone)]
pub struct YamlFile {
    path: RelativePath,
    value: serde_yaml::Value,
    marker: bool,
    options: FileOptions,
}

impl YamlFile {
    /// # Panics
    /// Panics if `path` is absolute, escapes the project or names the
    /// project directory itself (use `try_new`).
    pub fn new(path: impl Into<PathBuf>, value: serde_yaml::Value) -> Self {
        Self {
            path: RelativePath::file(path),
            value,
            marker: true,
            options: FileOptions::default(),
        }
    }

    pub fn try_new(path: impl Into<PathBuf>, value: serde_yaml::Value) -> Result<Self, DomainError> {
        Ok(Self {
            path: RelativePath::try_file(path)?,
            value,
            marker: true,
            options: FileOptions::default(),
        })
    }

    pub fn without_marker(mut self) -> Self {
        self.marker = false;
        self
    }

    pub fn with_options(mut self, options: FileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn value(&self) -> &serde_yaml::Value {
        &self.value
    }

    fn render(&self) -> TrellisResult<String> {
        let body = serde_yaml::to_string(&self.value).map_err(|e| {
            ApplicationError::RenderingFailed {
                path: self.path.clone().into_path_buf(),
                reason: e.to_string(),
            }
        })?;

        if self.marker {
            Ok(format!("# {GENERATED_MARKER}\n\n{body}"))
        } else {
            Ok(body)
        }
    }
}

impl Component for YamlFile {
    fn name(&self) -> &str {
        "YamlFile"
    }

    fn kind(&self) -> ComponentKind<'_> {
        ComponentKind::File(&self.path)
    }

    fn synthesize(&mut self, ctx: &mut SynthContext<'_>) -> TrellisResult<()> {
        let content = self.render()?;
        ctx.write_file(&self.path, &content, self.options)?;
        Ok(())
    }
}
