//! The project tree.
//!
//! Projects live in an arena owned by [`ProjectTree`] and refer to each
//! other by [`ProjectId`]. A child never holds a reference to its parent;
//! anything that needs the parent's directory goes through the tree.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::SynthContext;
use crate::components::{IgnoreFile, SampleReadme, VsCode};
use crate::domain::{
    Component, ComponentHandle, ComponentId, ComponentKind, DomainError, FileRef,
    paths::{normalize, resolve},
    validation::OutdirValidator,
};
use crate::error::TrellisResult;

/// Sentinel file whose presence authorizes synthesis rooted at the current
/// working directory. It doubles as the project definition read by the CLI.
pub const BOOTSTRAP_MARKER: &str = ".trellisrc.toml";

/// Stable identifier of a project inside its [`ProjectTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(usize);

impl ProjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Project-level extension points, both no-ops by default.
///
/// A concrete project type installs its own implementation through
/// [`ProjectOptions::with_hooks`].
pub trait ProjectHooks {
    /// Called before cleanup and before any component is synthesized.
    fn pre_synthesize(&mut self, _ctx: &mut SynthContext<'_>) -> TrellisResult<()> {
        Ok(())
    }

    /// Called after every component of the project ran `post_synthesize`.
    fn post_synthesize(&mut self, _ctx: &mut SynthContext<'_>) -> TrellisResult<()> {
        Ok(())
    }
}

/// Hooks that do nothing.
#[derive(Debug, Default)]
pub struct NoHooks;

impl ProjectHooks for NoHooks {}

/// Placeholder readme written once when a project is first synthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeOptions {
    pub filename: String,
    pub contents: String,
}

impl Default for ReadmeOptions {
    fn default() -> Self {
        Self {
            filename: "README.md".into(),
            contents: "# my project".into(),
        }
    }
}

/// Options accepted when creating a project.
#[derive(Default)]
pub struct ProjectOptions {
    /// Display name, used in logs only.
    pub name: Option<String>,
    /// Parent project. `None` for the root.
    pub parent: Option<ProjectId>,
    /// Output directory. Relative to the parent's outdir for sub-projects,
    /// relative to the working directory for the root (default `"."`).
    pub outdir: Option<PathBuf>,
    pub readme: ReadmeOptions,
    pub hooks: Option<Box<dyn ProjectHooks>>,
}

impl fmt::Debug for ProjectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectOptions")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("outdir", &self.outdir)
            .field("readme", &self.readme)
            .field("hooks", &self.hooks.is_some())
            .finish()
    }
}

impl ProjectOptions {
    /// Options for a root project writing into `outdir`.
    pub fn root(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: Some(outdir.into()),
            ..Self::default()
        }
    }

    /// Options for a sub-project of `parent` at the relative `outdir`.
    pub fn subproject(parent: ProjectId, outdir: impl Into<PathBuf>) -> Self {
        Self {
            parent: Some(parent),
            outdir: Some(outdir.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_readme(mut self, readme: ReadmeOptions) -> Self {
        self.readme = readme;
        self
    }

    pub fn with_hooks(mut self, hooks: impl ProjectHooks + 'static) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }
}

pub(crate) struct ComponentEntry {
    pub(crate) component: Box<dyn Component>,
}

/// A node in the project tree, bound to one output directory.
pub struct ProjectNode {
    id: ProjectId,
    name: String,
    outdir: PathBuf,
    parent: Option<ProjectId>,
    root: ProjectId,
    subprojects: Vec<ProjectId>,
    pub(crate) components: Vec<ComponentEntry>,
    pub(crate) hooks: Box<dyn ProjectHooks>,
    tips: Vec<String>,
    gitignore: ComponentHandle<IgnoreFile>,
    vscode: ComponentHandle<VsCode>,
}

impl fmt::Debug for ProjectNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("outdir", &self.outdir)
            .field("parent", &self.parent)
            .field("subprojects", &self.subprojects)
            .field("components", &self.components.len())
            .finish()
    }
}

impl ProjectNode {
    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute, normalised output directory.
    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    pub fn parent(&self) -> Option<ProjectId> {
        self.parent
    }

    pub fn root(&self) -> ProjectId {
        self.root
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Sub-projects in registration order.
    pub fn subprojects(&self) -> &[ProjectId] {
        &self.subprojects
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    pub fn gitignore(&self) -> ComponentHandle<IgnoreFile> {
        self.gitignore
    }

    pub fn vscode(&self) -> ComponentHandle<VsCode> {
        self.vscode
    }

    /// File components owned directly by this project, sorted by absolute
    /// path (byte-wise), not by registration order.
    pub fn files(&self) -> Vec<FileRef> {
        let mut files: Vec<FileRef> = self
            .components
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry.component.kind() {
                ComponentKind::File(path) => Some(FileRef {
                    component: ComponentId {
                        project: self.id,
                        index,
                    },
                    path: path.clone(),
                    absolute: self.outdir.join(path),
                }),
                ComponentKind::Plain | ComponentKind::Start(_) => None,
            })
            .collect();

        files.sort_by(|a, b| a.absolute.as_os_str().cmp(b.absolute.as_os_str()));
        files
    }

    /// Component kinds in registration order.
    pub fn component_kinds(&self) -> impl Iterator<Item = ComponentKind<'_>> {
        self.components.iter().map(|e| e.component.kind())
    }
}

/// Arena owning every project of one synthesis run.
#[derive(Debug)]
pub struct ProjectTree {
    projects: Vec<ProjectNode>,
}

impl ProjectTree {
    /// Create the root project, resolving its outdir against the current
    /// working directory.
    pub fn root(options: ProjectOptions) -> TrellisResult<Self> {
        let cwd = std::env::current_dir().map_err(|e| {
            crate::application::ApplicationError::FilesystemError {
                path: PathBuf::from("."),
                reason: format!("Failed to read current directory: {e}"),
            }
        })?;
        Ok(Self::root_in(options, &cwd)?)
    }

    /// Create the root project, resolving its outdir against `cwd`.
    ///
    /// Rooting at `cwd` itself requires [`BOOTSTRAP_MARKER`] to exist there.
    pub fn root_in(options: ProjectOptions, cwd: &Path) -> Result<Self, DomainError> {
        if let Some(declared) = options.parent {
            return Err(DomainError::ParentMismatch {
                expected: "none (root project)".into(),
                declared: declared.to_string(),
            });
        }

        let cwd = normalize(cwd);
        let requested = options
            .outdir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let outdir = resolve(&cwd, &requested);

        if outdir == cwd && !outdir.join(BOOTSTRAP_MARKER).exists() {
            return Err(DomainError::UnsafeRootOutdir {
                outdir: outdir.display().to_string(),
            });
        }

        let mut tree = Self {
            projects: Vec::new(),
        };
        tree.insert(options, outdir, None);
        Ok(tree)
    }

    /// Create a sub-project under `options.parent`.
    pub fn create(&mut self, options: ProjectOptions) -> Result<ProjectId, DomainError> {
        let parent = options.parent.ok_or_else(|| DomainError::InvalidOutdir {
            outdir: display_outdir(options.outdir.as_deref()),
            reason: "a sub-project needs a parent; use ProjectTree::root for the root".into(),
        })?;
        self.add_subproject(parent, options)
    }

    /// Attach a new sub-project under `under`.
    ///
    /// When `options.parent` is set it must name `under`. All checks run
    /// before anything is inserted, so a failed call leaves the tree as it was.
    pub fn add_subproject(
        &mut self,
        under: ProjectId,
        options: ProjectOptions,
    ) -> Result<ProjectId, DomainError> {
        let parent = self.project(under)?;

        match options.parent {
            Some(declared) if declared != under => {
                return Err(DomainError::ParentMismatch {
                    expected: under.to_string(),
                    declared: declared.to_string(),
                });
            }
            _ => {}
        }

        let outdir = OutdirValidator::subproject_outdir(parent.outdir(), options.outdir.as_deref())?;
        OutdirValidator::exclusive(
            &outdir,
            parent.subprojects.iter().map(|&id| self.projects[id.0].outdir()),
        )?;

        let id = self.insert(options, outdir, Some(under));
        self.projects[under.0].subprojects.push(id);
        Ok(id)
    }

    fn insert(&mut self, options: ProjectOptions, outdir: PathBuf, parent: Option<ProjectId>) -> ProjectId {
        let id = ProjectId(self.projects.len());
        let root = match parent {
            Some(p) => self.projects[p.0].root,
            None => id,
        };
        let name = options.name.unwrap_or_else(|| {
            outdir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "project".into())
        });

        let gitignore = ComponentHandle::new(ComponentId { project: id, index: 0 });
        let vscode = ComponentHandle::new(ComponentId { project: id, index: 1 });
        let components: Vec<ComponentEntry> = vec![
            ComponentEntry {
                component: Box::new(IgnoreFile::new(".gitignore")),
            },
            ComponentEntry {
                component: Box::new(VsCode::new()),
            },
            ComponentEntry {
                component: Box::new(SampleReadme::new(options.readme)),
            },
        ];

        debug!(project = %id, name = %name, outdir = %outdir.display(), "Project created");

        self.projects.push(ProjectNode {
            id,
            name,
            outdir,
            parent,
            root,
            subprojects: Vec::new(),
            components,
            hooks: options.hooks.unwrap_or_else(|| Box::new(NoHooks)),
            tips: Vec::new(),
            gitignore,
            vscode,
        });
        id
    }

    /// Id of the root project.
    pub fn root_id(&self) -> ProjectId {
        ProjectId(0)
    }

    pub fn project(&self, id: ProjectId) -> Result<&ProjectNode, DomainError> {
        self.projects
            .get(id.0)
            .ok_or(DomainError::UnknownProject(id.0))
    }

    pub(crate) fn project_mut(&mut self, id: ProjectId) -> Result<&mut ProjectNode, DomainError> {
        self.projects
            .get_mut(id.0)
            .ok_or(DomainError::UnknownProject(id.0))
    }

    /// Every project in creation order; the root comes first.
    pub fn projects(&self) -> impl Iterator<Item = &ProjectNode> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Append a component to `project`. Registering the same kind of
    /// component twice is allowed.
    pub fn add_component<C: Component>(
        &mut self,
        project: ProjectId,
        component: C,
    ) -> Result<ComponentHandle<C>, DomainError> {
        let node = self.project_mut(project)?;
        let id = ComponentId {
            project,
            index: node.components.len(),
        };
        debug!(component = %id, name = component.name(), "Component added");
        node.components.push(ComponentEntry {
            component: Box::new(component),
        });
        Ok(ComponentHandle::new(id))
    }

    pub fn component<C: Component>(&self, handle: ComponentHandle<C>) -> Result<&C, DomainError> {
        let id = handle.id();
        let entry = self
            .project(id.project)?
            .components
            .get(id.index)
            .ok_or(DomainError::UnknownComponent {
                project: id.project.0,
                index: id.index,
            })?;
        let component: &dyn Component = entry.component.as_ref();
        component
            .as_any()
            .downcast_ref::<C>()
            .ok_or(DomainError::ComponentTypeMismatch {
                project: id.project.0,
                index: id.index,
                expected: std::any::type_name::<C>(),
            })
    }

    pub fn component_mut<C: Component>(
        &mut self,
        handle: ComponentHandle<C>,
    ) -> Result<&mut C, DomainError> {
        let id = handle.id();
        let entry = self
            .project_mut(id.project)?
            .components
            .get_mut(id.index)
            .ok_or(DomainError::UnknownComponent {
                project: id.project.0,
                index: id.index,
            })?;
        let component: &mut dyn Component = entry.component.as_mut();
        component
            .as_any_mut()
            .downcast_mut::<C>()
            .ok_or(DomainError::ComponentTypeMismatch {
                project: id.project.0,
                index: id.index,
                expected: std::any::type_name::<C>(),
            })
    }

    /// The project's `.gitignore`.
    pub fn gitignore_mut(&mut self, project: ProjectId) -> Result<&mut IgnoreFile, DomainError> {
        let handle = self.project(project)?.gitignore;
        self.component_mut(handle)
    }

    /// The project's editor integration.
    pub fn vscode_mut(&mut self, project: ProjectId) -> Result<&mut VsCode, DomainError> {
        let handle = self.project(project)?.vscode;
        self.component_mut(handle)
    }

    /// Record an advisory message shown after a successful synthesis.
    pub fn add_tip(&mut self, project: ProjectId, message: impl Into<String>) -> Result<(), DomainError> {
        self.project_mut(project)?.tips.push(message.into());
        Ok(())
    }

    pub fn outdir(&self, project: ProjectId) -> Result<&Path, DomainError> {
        Ok(self.project(project)?.outdir())
    }

    /// See [`ProjectNode::files`].
    pub fn files(&self, project: ProjectId) -> Result<Vec<FileRef>, DomainError> {
        Ok(self.project(project)?.files())
    }

    /// Find a file component by path.
    ///
    /// A relative `path` is resolved against `project`'s own outdir. The
    /// project's own files are searched first, then every sub-project
    /// depth-first in registration order.
    pub fn find_file(
        &self,
        project: ProjectId,
        path: impl AsRef<Path>,
    ) -> Result<Option<FileRef>, DomainError> {
        let node = self.project(project)?;
        let absolute = resolve(node.outdir(), path.as_ref());
        Ok(self.find_absolute(node, &absolute))
    }

    fn find_absolute(&self, node: &ProjectNode, absolute: &Path) -> Option<FileRef> {
        if let Some(file) = node.files().into_iter().find(|f| f.absolute == absolute) {
            return Some(file);
        }

        node.subprojects
            .iter()
            .find_map(|&child| self.find_absolute(&self.projects[child.0], absolute))
    }

    /// Advisory tips of every project, root first, then depth-first.
    pub fn collect_tips(&self) -> Vec<String> {
        let mut tips = Vec::new();
        self.collect_tips_from(&self.projects[0], &mut tips);
        tips
    }

    fn collect_tips_from(&self, node: &ProjectNode, tips: &mut Vec<String>) {
        tips.extend(node.tips.iter().cloned());
        for &child in &node.subprojects {
            self.collect_tips_from(&self.projects[child.0], tips);
        }
    }
}

fn display_outdir(outdir: Option<&Path>) -> String {
    outdir
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<none>".into())
}
