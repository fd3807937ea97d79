//! `trellis init`: write a starter `.trellisrc.toml`.

use tracing::debug;
use trellis_core::domain::StartMenu;

use crate::{
    cli::{GlobalArgs, InitArgs, PresetArg},
    definition::{Preset, ProjectDefinition},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: InitArgs, global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    let dir = global
        .working_dir()
        .with_cli_context(|| "Failed to resolve the working directory")?;
    let path = ProjectDefinition::path_in(&dir);

    if path.exists() && !args.force {
        return Err(CliError::DefinitionExists { path });
    }

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".into());
    let definition = starter(name, args.preset);

    std::fs::write(&path, definition.to_toml()?)
        .with_cli_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), "Project definition written");

    output.success(&format!("Created {}", path.display()))?;
    output.info("Run `trellis synth` to generate the project")?;
    Ok(())
}

fn starter(name: String, preset: Option<PresetArg>) -> ProjectDefinition {
    ProjectDefinition {
        name: Some(name),
        preset: preset.map(|preset| match preset {
            PresetArg::PnpmWorkspace => Preset::PnpmWorkspace,
        }),
        tips: vec!["Edit .trellisrc.toml and run `trellis synth` to apply changes".into()],
        start: Some(
            StartMenu::new()
                .with_entry("trellis synth", "Regenerate the project")
                .with_entry("trellis files", "List generated files"),
        ),
        ..ProjectDefinition::default()
    }
}
