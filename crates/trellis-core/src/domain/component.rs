//! The component contract.
//!
//! A component is a unit of generation logic owned by exactly one project.
//! Components never hold references to their project; the synthesis driver
//! hands them a [`SynthContext`] scoped to the owning project instead.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::application::SynthContext;
use crate::domain::{ProjectId, RelativePath};
use crate::error::TrellisResult;

/// Capability tag carried by every component.
///
/// The tree inspects components only through this tag: a file-bearing
/// component shows up in [`crate::domain::ProjectTree::files`], a start
/// marker switches on the start menu in the root's synthesis report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind<'a> {
    Plain,
    File(&'a RelativePath),
    Start(&'a StartMenu),
}

/// Upcast helper so typed handles can get their concrete component back.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A pluggable unit of generation logic.
///
/// Both lifecycle callbacks default to no-ops. `synthesize` runs in
/// registration order; `post_synthesize` runs after every sibling's
/// `synthesize` and after all sub-projects finished, in no guaranteed order.
pub trait Component: AsAny {
    /// Human readable name used in logs and error messages.
    fn name(&self) -> &str;

    fn kind(&self) -> ComponentKind<'_> {
        ComponentKind::Plain
    }

    fn synthesize(&mut self, _ctx: &mut SynthContext<'_>) -> TrellisResult<()> {
        Ok(())
    }

    fn post_synthesize(&mut self, _ctx: &mut SynthContext<'_>) -> TrellisResult<()> {
        Ok(())
    }
}

/// Stable identifier of a registered component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    pub project: ProjectId,
    pub index: usize,
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.index)
    }
}

/// Typed identifier returned by `add_component`.
pub struct ComponentHandle<C> {
    id: ComponentId,
    _marker: PhantomData<fn() -> C>,
}

impl<C> ComponentHandle<C> {
    pub(crate) fn new(id: ComponentId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }
}

impl<C> Clone for ComponentHandle<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ComponentHandle<C> {}

impl<C> fmt::Debug for ComponentHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentHandle").field(&self.id).finish()
    }
}

impl<C> PartialEq for ComponentHandle<C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Read-only view of a file-bearing component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub component: ComponentId,
    /// Path relative to the owning project's outdir.
    pub path: RelativePath,
    /// Owning project's outdir joined with `path`.
    pub absolute: PathBuf,
}

/// Entries shown by the start menu once the root finished synthesizing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartMenu {
    pub entries: Vec<StartEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartEntry {
    pub name: String,
    pub description: String,
}

impl StartMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.entries.push(StartEntry {
            name: name.into(),
            description: description.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
