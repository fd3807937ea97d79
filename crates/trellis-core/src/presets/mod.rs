//! Ready-made project layouts built from the built-in components.

pub mod pnpm_workspace;

pub use pnpm_workspace::{PnpmWorkspace, PnpmWorkspaceOptions};
