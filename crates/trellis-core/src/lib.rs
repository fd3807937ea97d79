//! Trellis Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Trellis, a
//! declarative project-scaffolding engine: a tree of projects, each bound to
//! an output directory and owning an ordered list of components, synthesized
//! into files on disk.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           trellis-cli (CLI)             │
//! │   (loads .trellisrc.toml, reports)      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (SynthService, SynthContext)          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │        (Filesystem, Cleanup)            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    trellis-adapters (Infrastructure)    │
//! │ (LocalFilesystem, ManifestCleanup, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │           Domain Layer                  │
//! │ (ProjectTree, Component, RelativePath)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trellis_core::prelude::*;
//! use trellis_core::components::TextFile;
//! use trellis_adapters::{LocalFilesystem, ManifestCleanup};
//!
//! // 1. Build the tree
//! let mut tree = ProjectTree::root(ProjectOptions::root("out")).unwrap();
//! let root = tree.root_id();
//! tree.add_component(root, TextFile::new("hello.txt").with_line("hi")).unwrap();
//!
//! // 2. Synthesize it (with injected adapters)
//! let service = SynthService::new(
//!     Box::new(LocalFilesystem::new()),
//!     Box::new(ManifestCleanup::new(LocalFilesystem::new())),
//! );
//! let report = service.synth(&mut tree).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod components;

pub mod presets;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FileOptions, SynthContext, SynthReport, SynthService,
        ports::{Cleanup, Filesystem},
    };
    pub use crate::domain::{
        BOOTSTRAP_MARKER, Component, ComponentHandle, ComponentKind, FileRef, ProjectHooks,
        ProjectId, ProjectOptions, ProjectTree, RelativePath, StartMenu,
    };
    pub use crate::error::{TrellisError, TrellisResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
