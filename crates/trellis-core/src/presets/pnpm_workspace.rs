//! pnpm workspace for mono repositories.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::components::{SampleDir, YamlFile};
use crate::domain::{
    BOOTSTRAP_MARKER, ComponentHandle, ProjectId, ProjectOptions, ProjectTree, ReadmeOptions,
};
use crate::error::TrellisResult;

const WORKSPACE_FILE: &str = "pnpm-workspace.yaml";

const WORKSPACE_PACKAGES: &[&str] = &["packages/**", "!**/cdk.out/**", "!**/__fixtures__/**"];

const NODE_IGNORES: &[&str] = &[
    "# Logs",
    "logs",
    "*.log",
    "npm-debug.log*",
    "yarn-debug.log*",
    "yarn-error.log*",
    "lerna-debug.log*",
    "# Diagnostic reports (https://nodejs.org/api/report.html)",
    "report.[0-9]*.[0-9]*.[0-9]*.[0-9]*.json",
    "# Runtime data",
    "pids",
    "*.pid",
    "*.seed",
    "*.pid.lock",
    "# Directory for instrumented libs generated by jscoverage/JSCover",
    "lib-cov",
    "# Coverage directory used by tools like istanbul",
    "coverage",
    "*.lcov",
    "# nyc test coverage",
    ".nyc_output",
    "# Compiled binary addons (https://nodejs.org/api/addons.html)",
    "build/Release",
    "# Dependency directories",
    "node_modules/",
    "jspm_packages/",
    "# TypeScript cache",
    "*.tsbuildinfo",
    "# Optional eslint cache",
    ".eslintcache",
    "# Output of 'npm pack'",
    "*.tgz",
    "# Yarn Integrity file",
    ".yarn-integrity",
    "# parcel-bundler cache (https://parceljs.org/)",
    ".cache",
];

/// Options for [`PnpmWorkspace::root_in`].
#[derive(Debug, Clone)]
pub struct PnpmWorkspaceOptions {
    pub outdir: PathBuf,
    pub name: Option<String>,
    pub readme: ReadmeOptions,
    /// Additional `.gitignore` entries.
    pub gitignore: Vec<String>,
}

impl Default for PnpmWorkspaceOptions {
    fn default() -> Self {
        Self {
            outdir: PathBuf::from("."),
            name: None,
            readme: PnpmWorkspace::default_readme(),
            gitignore: Vec::new(),
        }
    }
}

/// A project laid out as a pnpm workspace.
#[derive(Debug, Clone, Copy)]
pub struct PnpmWorkspace {
    project: ProjectId,
    workspace_file: ComponentHandle<YamlFile>,
}

impl PnpmWorkspace {
    /// Create a tree whose root is a pnpm workspace.
    pub fn root_in(options: PnpmWorkspaceOptions, cwd: &Path) -> TrellisResult<(ProjectTree, Self)> {
        let mut project = ProjectOptions::root(&options.outdir).with_readme(options.readme);
        if let Some(name) = options.name {
            project = project.with_name(name);
        }

        let mut tree = ProjectTree::root_in(project, cwd)?;
        let root = tree.root_id();
        let workspace = Self::apply(&mut tree, root, &options.gitignore)?;
        Ok((tree, workspace))
    }

    /// Readme a workspace starts with unless told otherwise.
    pub fn default_readme() -> ReadmeOptions {
        ReadmeOptions {
            filename: "README.md".into(),
            contents: "# replace this".into(),
        }
    }

    /// Turn an existing project into a pnpm workspace. The readme is fixed
    /// when the project is created, so callers pass
    /// [`PnpmWorkspace::default_readme`] there.
    pub fn apply(
        tree: &mut ProjectTree,
        project: ProjectId,
        extra_ignores: &[String],
    ) -> TrellisResult<Self> {
        let mut document = Mapping::new();
        document.insert(
            Value::from("packages"),
            Value::Sequence(WORKSPACE_PACKAGES.iter().map(|p| Value::from(*p)).collect()),
        );
        let workspace_file =
            tree.add_component(project, YamlFile::new(WORKSPACE_FILE, Value::Mapping(document)))?;

        tree.add_component(project, SampleDir::new("packages").with_file(".gitkeep", ""))?;

        let gitignore = tree.gitignore_mut(project)?;
        gitignore.exclude(NODE_IGNORES.iter().copied());
        gitignore.exclude(extra_ignores.iter().cloned());
        gitignore.include([format!("/{BOOTSTRAP_MARKER}")]);

        Ok(Self {
            project,
            workspace_file,
        })
    }

    pub fn project(&self) -> ProjectId {
        self.project
    }

    pub fn workspace_file(&self) -> ComponentHandle<YamlFile> {
        self.workspace_file
    }
}
