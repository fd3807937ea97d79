//! Subcommand handlers. Each one translates arguments into core calls and
//! reports the result; no business logic lives here.

pub mod completions;
pub mod config;
pub mod files;
pub mod find;
pub mod init;
pub mod synth;
