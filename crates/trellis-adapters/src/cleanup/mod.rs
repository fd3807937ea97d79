//! Cleanup adapters.

mod manifest;

pub use manifest::{MANIFEST_DIR, MANIFEST_FILE, ManifestCleanup};
