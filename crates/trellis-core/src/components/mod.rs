//! Built-in components.
//!
//! Every project starts with an [`IgnoreFile`] (`.gitignore`), a [`VsCode`]
//! integration and a [`SampleReadme`]. The rest are registered explicitly
//! through [`crate::domain::ProjectTree::add_component`].

pub mod file;
pub mod ignore_file;
pub mod sample;
pub mod start;
pub mod vscode;

pub use file::{JsonFile, TextFile, YamlFile};
pub use ignore_file::IgnoreFile;
pub use sample::{SampleDir, SampleFile, SampleReadme};
pub use start::Start;
pub use vscode::{LaunchConfiguration, VsCode};

/// Header placed in generated files whose format has room for it.
pub const GENERATED_MARKER: &str =
    "~~ Generated by trellis. To modify, edit .trellisrc.toml and run \"trellis synth\".";
