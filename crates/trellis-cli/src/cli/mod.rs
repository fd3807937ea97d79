//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "trellis",
    bin_name = "trellis",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Declarative project synthesis",
    long_about = "Trellis turns the project tree described in .trellisrc.toml \
                  into files on disk, removing whatever the previous run \
                  generated and is no longer wanted.",
    after_help = "EXAMPLES:\n\
        \x20 trellis init\n\
        \x20 trellis synth\n\
        \x20 trellis files --project packages/api\n\
        \x20 trellis completions bash > /usr/share/bash-completion/completions/trellis",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Synthesize the project tree defined in `.trellisrc.toml`.
    #[command(
        visible_alias = "s",
        about = "Synthesize the project",
        after_help = "EXAMPLES:\n\
            \x20 trellis synth\n\
            \x20 trellis -v synth --no-tips"
    )]
    Synth(SynthArgs),

    /// Write a starter `.trellisrc.toml`.
    #[command(
        about = "Create a project definition",
        after_help = "EXAMPLES:\n\
            \x20 trellis init\n\
            \x20 trellis init --preset pnpm-workspace\n\
            \x20 trellis init --force"
    )]
    Init(InitArgs),

    /// List the generated files a project declares.
    #[command(
        visible_alias = "ls",
        about = "List generated files",
        after_help = "EXAMPLES:\n\
            \x20 trellis files\n\
            \x20 trellis files --project packages/api\n\
            \x20 trellis --output-format json files"
    )]
    Files(FilesArgs),

    /// Look up which project generates a path.
    #[command(
        about = "Find the component that generates a file",
        after_help = "EXAMPLES:\n\
            \x20 trellis find .gitignore\n\
            \x20 trellis find packages/api/package.json"
    )]
    Find(FindArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 trellis completions bash > ~/.local/share/bash-completion/completions/trellis\n\
            \x20 trellis completions zsh  > ~/.zfunc/_trellis\n\
            \x20 trellis completions fish > ~/.config/fish/completions/trellis.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Trellis configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 trellis config get output.no_color\n\
            \x20 trellis config list\n\
            \x20 trellis config path"
    )]
    Config(ConfigCommands),
}

impl Commands {
    /// Subcommand name, for spans and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Synth(_) => "synth",
            Self::Init(_) => "init",
            Self::Files(_) => "files",
            Self::Find(_) => "find",
            Self::Completions(_) => "completions",
            Self::Config(_) => "config",
        }
    }
}

// ── synth ─────────────────────────────────────────────────────────────────────

/// Arguments for `trellis synth`.
#[derive(Debug, Args)]
pub struct SynthArgs {
    /// Do not print tips after a successful run.
    #[arg(long = "no-tips", help = "Do not print tips")]
    pub no_tips: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `trellis init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Start from a preset instead of an empty project.
    #[arg(long = "preset", value_enum, help = "Project preset")]
    pub preset: Option<PresetArg>,

    /// Overwrite an existing `.trellisrc.toml`.
    #[arg(short = 'f', long = "force", help = "Overwrite existing project definition")]
    pub force: bool,
}

/// Presets selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    PnpmWorkspace,
}

// ── files / find ──────────────────────────────────────────────────────────────

/// Arguments for `trellis files`.
#[derive(Debug, Args)]
pub struct FilesArgs {
    /// Sub-project to list, by outdir relative to the root.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "OUTDIR",
        help = "Sub-project outdir (default: root)"
    )]
    pub project: Option<PathBuf>,
}

/// Arguments for `trellis find`.
#[derive(Debug, Args)]
pub struct FindArgs {
    /// Path relative to the root project's outdir, or absolute.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `trellis completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `trellis config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.no_color`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_synth_alias() {
        let cli = Cli::parse_from(["trellis", "s"]);
        assert!(matches!(cli.command, Commands::Synth(SynthArgs { no_tips: false })));
    }

    #[test]
    fn parse_init_with_preset() {
        let cli = Cli::parse_from(["trellis", "init", "--preset", "pnpm-workspace", "-f"]);
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.preset, Some(PresetArg::PnpmWorkspace));
                assert!(args.force);
            }
            other => panic!("expected Init, got {other:?}"),
        }
    }

    #[test]
    fn parse_files_for_subproject() {
        let cli = Cli::parse_from(["trellis", "files", "--project", "packages/api"]);
        match cli.command {
            Commands::Files(args) => {
                assert_eq!(args.project, Some(PathBuf::from("packages/api")));
            }
            other => panic!("expected Files, got {other:?}"),
        }
    }

    #[test]
    fn find_requires_path() {
        assert!(Cli::try_parse_from(["trellis", "find"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["trellis", "--quiet", "--verbose", "synth"]);
        assert!(result.is_err());
    }
}
