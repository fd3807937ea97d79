//! Editor integration.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::application::{ApplicationError, FileOptions, SynthContext};
use crate::components::GENERATED_MARKER;
use crate::domain::{Component, ComponentKind, RelativePath};

const LAUNCH_FILE: &str = ".vscode/launch.json";
use crate::error::TrellisResult;

/// One entry of `.vscode/launch.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfiguration {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub request: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl LaunchConfiguration {
    pub fn launch(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            request: "launch".into(),
            program: None,
            args: Vec::new(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// VS Code settings for a project. Writes nothing until a launch
/// configuration is added; from then on it is the file component behind
/// `.vscode/launch.json`.
#[derive(Debug, Clone)]
pub struct VsCode {
    path: RelativePath,
    launch: Vec<LaunchConfiguration>,
}

impl Default for VsCode {
    fn default() -> Self {
        Self::new()
    }
}

impl VsCode {
    pub fn new() -> Self {
        Self {
            path: RelativePath::new(LAUNCH_FILE),
            launch: Vec::new(),
        }
    }

    pub fn add_configuration(&mut self, configuration: LaunchConfiguration) {
        self.launch.push(configuration);
    }

    pub fn configurations(&self) -> &[LaunchConfiguration] {
        &self.launch
    }
}

impl Component for VsCode {
    fn name(&self) -> &str {
        "VsCode"
    }

    fn kind(&self) -> ComponentKind<'_> {
        if self.launch.is_empty() {
            ComponentKind::Plain
        } else {
            ComponentKind::File(&self.path)
        }
    }

    fn synthesize(&mut self, ctx: &mut SynthContext<'_>) -> TrellisResult<()> {
        if self.launch.is_empty() {
            return Ok(());
        }

        let document = json!({
            "//": GENERATED_MARKER,
            "version": "0.2.0",
            "configurations": self.launch,
        });
        let mut content =
            serde_json::to_string_pretty(&document).map_err(|e| ApplicationError::RenderingFailed {
                path: self.path.as_path().to_path_buf(),
                reason: e.to_string(),
            })?;
        content.push('\n');

        ctx.write_file(&self.path, &content, FileOptions::default())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProjectOptions, ProjectTree};
    use std::path::Path;

    fn tree() -> ProjectTree {
        ProjectTree::root_in(ProjectOptions::root("out"), Path::new("/w")).unwrap()
    }

    #[test]
    fn hidden_until_configured() {
        let tree = tree();
        assert_eq!(tree.find_file(tree.root_id(), LAUNCH_FILE).unwrap(), None);
    }

    #[test]
    fn launch_file_is_a_file_component_once_configured() {
        let mut tree = tree();
        let root = tree.root_id();
        tree.vscode_mut(root)
            .unwrap()
            .add_configuration(LaunchConfiguration::launch("debug", "node").with_program("index.js"));

        let found = tree.find_file(root, ".vscode/launch.json").unwrap().unwrap();
        assert_eq!(found.absolute, Path::new("/w/out/.vscode/launch.json"));
        assert_eq!(found.component, tree.project(root).unwrap().vscode().id());
        assert!(tree.files(root).unwrap().contains(&found));
    }

    #[test]
    fn configuration_serializes_type_field() {
        let config = LaunchConfiguration::launch("run", "node").with_args(["--inspect"]);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], "node");
        assert_eq!(value["request"], "launch");
        assert!(value.get("program").is_none());
    }
}
