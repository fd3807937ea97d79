//! `.trellisrc.toml`: the project tree, declared in TOML.
//!
//! The file describes the root project and, recursively, its sub-projects.
//! Its presence in a directory is also what allows the root project to be
//! synthesized into that very directory.
//!
//! ```toml
//! name = "demo"
//! gitignore = ["dist/"]
//! tips = ["Run `trellis synth` after editing this file"]
//!
//! [[files]]
//! path = "hello.txt"
//! lines = ["hello"]
//!
//! [[subprojects]]
//! outdir = "packages/api"
//!
//! [[subprojects.json]]
//! path = "package.json"
//! content = { name = "api" }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use trellis_core::{
    application::FileOptions,
    components::{JsonFile, LaunchConfiguration, SampleFile, Start, TextFile, YamlFile},
    domain::{ProjectId, ProjectOptions, ProjectTree, ReadmeOptions, StartMenu, BOOTSTRAP_MARKER},
    presets::PnpmWorkspace,
};

use crate::error::{CliError, CliResult};

/// One project of the tree, root or nested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Root: relative to the definition's directory (default `.`).
    /// Sub-project: relative to the parent's outdir, required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<ReadmeDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gitignore: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<TextDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub json: Vec<JsonDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub yaml: Vec<YamlDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<SampleDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub launch: Vec<LaunchConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<StartMenu>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subprojects: Vec<ProjectDefinition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    PnpmWorkspace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadmeDefinition {
    #[serde(default = "default_readme_filename")]
    pub filename: String,
    pub contents: String,
}

fn default_readme_filename() -> String {
    ReadmeOptions::default().filename
}

fn default_true() -> bool {
    true
}

/// Settings shared by every generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFlags {
    #[serde(default = "default_true")]
    pub readonly: bool,
    #[serde(default)]
    pub executable: bool,
}

impl Default for FileFlags {
    fn default() -> Self {
        Self {
            readonly: true,
            executable: false,
        }
    }
}

impl From<FileFlags> for FileOptions {
    fn from(flags: FileFlags) -> Self {
        FileOptions {
            readonly: flags.readonly,
            executable: flags.executable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDefinition {
    pub path: PathBuf,
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(flatten)]
    pub flags: FileFlags,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonDefinition {
    pub path: PathBuf,
    pub content: serde_json::Value,
    #[serde(default = "default_true")]
    pub marker: bool,
    #[serde(flatten)]
    pub flags: FileFlags,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YamlDefinition {
    pub path: PathBuf,
    pub content: serde_yaml::Value,
    #[serde(default = "default_true")]
    pub marker: bool,
    #[serde(flatten)]
    pub flags: FileFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDefinition {
    pub path: PathBuf,
    #[serde(default)]
    pub contents: String,
}

impl ProjectDefinition {
    /// Path of the definition inside `dir`.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(BOOTSTRAP_MARKER)
    }

    /// Read and parse the definition in `dir`.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn load(dir: &Path) -> CliResult<Self> {
        let path = Self::path_in(dir);
        if !path.is_file() {
            return Err(CliError::DefinitionNotFound { path });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| CliError::IoError {
            message: format!("Failed to read {}", path.display()),
            source: e,
        })?;
        Self::parse(&path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> CliResult<Self> {
        toml::from_str(content).map_err(|e| CliError::InvalidDefinition {
            path: path.to_path_buf(),
            message: e.message().to_string(),
            source: Some(Box::new(e)),
        })
    }

    /// Render as TOML, for `trellis init`.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::InvalidInput {
            message: format!("Failed to serialise project definition: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Build the project tree rooted in `dir`.
    ///
    /// Every tree invariant is checked by the core while building; the
    /// first violation aborts and nothing is written.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn build(&self, dir: &Path) -> CliResult<ProjectTree> {
        let mut options = ProjectOptions::root(self.outdir.clone().unwrap_or_else(|| ".".into()))
            .with_readme(self.readme_options());
        if let Some(name) = &self.name {
            options = options.with_name(name.clone());
        }

        let mut tree = ProjectTree::root_in(options, dir)?;
        let root = tree.root_id();
        self.populate(&mut tree, root)?;
        debug!(projects = tree.len(), "Project tree built");
        Ok(tree)
    }

    fn readme_options(&self) -> ReadmeOptions {
        match (&self.readme, self.preset) {
            (Some(readme), _) => ReadmeOptions {
                filename: readme.filename.clone(),
                contents: readme.contents.clone(),
            },
            (None, Some(Preset::PnpmWorkspace)) => PnpmWorkspace::default_readme(),
            (None, None) => ReadmeOptions::default(),
        }
    }

    fn populate(&self, tree: &mut ProjectTree, project: ProjectId) -> CliResult<()> {
        match self.preset {
            Some(Preset::PnpmWorkspace) => {
                PnpmWorkspace::apply(tree, project, &self.gitignore)?;
            }
            None => tree.gitignore_mut(project)?.exclude(self.gitignore.iter().cloned()),
        }

        for tip in &self.tips {
            tree.add_tip(project, tip.clone())?;
        }

        for file in &self.files {
            let component = TextFile::try_new(&file.path)?
                .with_lines(file.lines.iter().cloned())
                .with_options(file.flags.into());
            tree.add_component(project, component)?;
        }

        for file in &self.json {
            let mut component =
                JsonFile::try_new(&file.path, file.content.clone())?.with_options(file.flags.into());
            if !file.marker {
                component = component.without_marker();
            }
            tree.add_component(project, component)?;
        }

        for file in &self.yaml {
            let mut component =
                YamlFile::try_new(&file.path, file.content.clone())?.with_options(file.flags.into());
            if !file.marker {
                component = component.without_marker();
            }
            tree.add_component(project, component)?;
        }

        for sample in &self.samples {
            tree.add_component(
                project,
                SampleFile::try_new(&sample.path, sample.contents.clone())?,
            )?;
        }

        for configuration in &self.launch {
            tree.vscode_mut(project)?
                .add_configuration(configuration.clone());
        }

        if let Some(menu) = &self.start {
            tree.add_component(project, Start::new(menu.clone()))?;
        }

        for child in &self.subprojects {
            let outdir = child.outdir.clone().ok_or_else(|| CliError::InvalidDefinition {
                path: PathBuf::from(BOOTSTRAP_MARKER),
                message: "every sub-project needs an outdir".into(),
                source: None,
            })?;
            let mut options =
                ProjectOptions::subproject(project, outdir).with_readme(child.readme_options());
            if let Some(name) = &child.name {
                options = options.with_name(name.clone());
            }

            let id = tree.add_subproject(project, options)?;
            child.populate(tree, id)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use trellis_core::domain::{ComponentKind, DomainError};
    use trellis_core::error::TrellisError;

    const DEFINITION: &str = r##"
name = "demo"
gitignore = ["dist/"]
tips = ["root tip"]

[[files]]
path = "hello.txt"
lines = ["hello"]

[[files]]
path = "bin/run.sh"
lines = ["#!/bin/sh"]
executable = true

[start]
entries = [{ name = "synth", description = "Regenerate" }]

[[subprojects]]
outdir = "packages/api"
tips = ["api tip"]

[[subprojects.json]]
path = "package.json"
content = { name = "api", private = true }
"##;

    fn dir_with_marker() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(BOOTSTRAP_MARKER), DEFINITION).unwrap();
        temp
    }

    #[test]
    fn parses_nested_definition() {
        let def = ProjectDefinition::parse(Path::new("x"), DEFINITION).unwrap();
        assert_eq!(def.name.as_deref(), Some("demo"));
        assert_eq!(def.files.len(), 2);
        assert!(def.files[0].flags.readonly);
        assert!(def.files[1].flags.executable);
        assert_eq!(def.subprojects.len(), 1);
        assert_eq!(def.subprojects[0].json[0].content["name"], "api");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ProjectDefinition::parse(Path::new("x"), "nmae = \"typo\"").unwrap_err();
        assert!(matches!(err, CliError::InvalidDefinition { .. }));
    }

    #[test]
    fn builds_tree_at_marker_directory() {
        let temp = dir_with_marker();
        let def = ProjectDefinition::load(temp.path()).unwrap();
        let tree = def.build(temp.path()).unwrap();

        assert_eq!(tree.len(), 2);
        let root = tree.root_id();
        let files: Vec<_> = tree
            .files(root)
            .unwrap()
            .into_iter()
            .map(|f| f.path.to_string())
            .collect();
        assert_eq!(files, vec![".gitignore", "bin/run.sh", "hello.txt"]);
        assert!(
            tree.project(root)
                .unwrap()
                .component_kinds()
                .any(|k| matches!(k, ComponentKind::Start(_)))
        );
        assert_eq!(tree.collect_tips(), vec!["root tip", "api tip"]);
    }

    #[test]
    fn missing_definition_is_not_found() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            ProjectDefinition::load(temp.path()),
            Err(CliError::DefinitionNotFound { .. })
        ));
    }

    #[test]
    fn duplicate_subproject_outdir_surfaces_core_error() {
        let temp = TempDir::new().unwrap();
        let def = ProjectDefinition {
            outdir: Some("out".into()),
            subprojects: vec![
                ProjectDefinition {
                    outdir: Some("pkg".into()),
                    ..ProjectDefinition::default()
                },
                ProjectDefinition {
                    outdir: Some("./pkg".into()),
                    ..ProjectDefinition::default()
                },
            ],
            ..ProjectDefinition::default()
        };
        let err = def.build(temp.path()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(TrellisError::Domain(DomainError::DuplicateOutdir { .. }))
        ));
    }

    #[test]
    fn escaping_file_path_is_rejected() {
        let temp = dir_with_marker();
        let def = ProjectDefinition {
            files: vec![TextDefinition {
                path: "../escape.txt".into(),
                lines: vec![],
                flags: FileFlags::default(),
            }],
            ..ProjectDefinition::default()
        };
        assert!(matches!(
            def.build(temp.path()),
            Err(CliError::Core(TrellisError::Domain(
                DomainError::PathEscapesProject { .. }
            )))
        ));
    }

    #[test]
    fn file_path_naming_outdir_fails_at_build() {
        let temp = dir_with_marker();
        let def = ProjectDefinition::parse(Path::new("x"), "[[files]]\npath = \".\"\n").unwrap();
        assert!(matches!(
            def.build(temp.path()),
            Err(CliError::Core(TrellisError::Domain(
                DomainError::NotAFilePath { .. }
            )))
        ));
    }

    #[test]
    fn escaping_sample_path_is_rejected() {
        let temp = dir_with_marker();
        let def = ProjectDefinition {
            samples: vec![SampleDefinition {
                path: "../notes.md".into(),
                contents: String::new(),
            }],
            ..ProjectDefinition::default()
        };
        assert!(matches!(
            def.build(temp.path()),
            Err(CliError::Core(TrellisError::Domain(
                DomainError::PathEscapesProject { .. }
            )))
        ));
    }

    #[test]
    fn pnpm_preset_defaults_its_own_readme() {
        let def = ProjectDefinition {
            preset: Some(Preset::PnpmWorkspace),
            ..ProjectDefinition::default()
        };
        assert_eq!(def.readme_options().contents, "# replace this");

        let explicit = ProjectDefinition {
            readme: Some(ReadmeDefinition {
                filename: "README.md".into(),
                contents: "# mine".into(),
            }),
            ..def
        };
        assert_eq!(explicit.readme_options().contents, "# mine");
        assert_eq!(
            ProjectDefinition::default().readme_options(),
            ReadmeOptions::default()
        );
    }

    #[test]
    fn pnpm_preset_adds_workspace_file() {
        let temp = dir_with_marker();
        let def = ProjectDefinition {
            preset: Some(Preset::PnpmWorkspace),
            ..ProjectDefinition::default()
        };
        let tree = def.build(temp.path()).unwrap();
        assert!(
            tree.find_file(tree.root_id(), "pnpm-workspace.yaml")
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn round_trips_through_toml() {
        let def = ProjectDefinition {
            name: Some("demo".into()),
            preset: Some(Preset::PnpmWorkspace),
            ..ProjectDefinition::default()
        };
        let rendered = def.to_toml().unwrap();
        assert!(rendered.contains("preset = \"pnpm-workspace\""));
        assert_eq!(ProjectDefinition::parse(Path::new("x"), &rendered).unwrap(), def);
    }
}
