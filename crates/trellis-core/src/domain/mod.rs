// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Trellis.
//!
//! This module owns the project tree and the component contract:
//!
//! - **Arena ownership**: projects live in a [`ProjectTree`] and point at each
//!   other through [`ProjectId`]s, never through references
//! - **Outdir invariants**: sub-project outdirs are strictly nested and
//!   sibling outdirs are disjoint; checked before anything is inserted
//! - **Tagged components**: every [`Component`] reports a [`ComponentKind`]
//!   and the tree only ever pattern-matches on that tag
//!
//! I/O is limited to the bootstrap-marker check; everything else goes through
//! the ports in [`crate::application::ports`].
pub mod component;
pub mod error;
pub mod paths;
pub mod permissions;
pub mod project;

mod validation;

pub use component::{
    AsAny, Component, ComponentHandle, ComponentId, ComponentKind, FileRef, StartEntry, StartMenu,
};
pub use error::{DomainError, ErrorCategory};
pub use paths::RelativePath;
pub use permissions::Permissions;
pub use project::{
    BOOTSTRAP_MARKER, NoHooks, ProjectHooks, ProjectId, ProjectNode, ProjectOptions, ProjectTree,
    ReadmeOptions,
};
pub use validation::OutdirValidator;
