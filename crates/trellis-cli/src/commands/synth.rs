//! `trellis synth`: build the tree from `.trellisrc.toml` and write it out.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};
use trellis_adapters::{LocalFilesystem, ManifestCleanup};
use trellis_core::{
    application::{SynthReport, SynthService},
    domain::StartMenu,
};

use crate::{
    cli::{GlobalArgs, OutputFormat, SynthArgs},
    config::AppConfig,
    definition::ProjectDefinition,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Machine-readable summary for `--output-format json`.
#[derive(Debug, Serialize)]
struct SynthSummary<'a> {
    projects: usize,
    generated: Vec<PathBuf>,
    tips: &'a [String],
    start: Option<&'a StartMenu>,
}

#[instrument(skip_all)]
pub fn execute(
    args: SynthArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let dir = global
        .working_dir()
        .with_cli_context(|| "Failed to resolve the working directory")?;

    let definition = ProjectDefinition::load(&dir)?;
    let mut tree = definition.build(&dir)?;

    let service = SynthService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(ManifestCleanup::new(LocalFilesystem::new())),
    );
    let report = service.synth(&mut tree)?;
    info!(files = report.generated.len(), "Project synthesized");

    if output.format() == OutputFormat::Json {
        let summary = SynthSummary {
            projects: report.projects,
            generated: report
                .generated
                .iter()
                .map(|path| path.strip_prefix(&dir).unwrap_or(path).to_path_buf())
                .collect(),
            tips: &report.tips,
            start: report.start.as_ref(),
        };
        output.json(&summary)?;
        return Ok(());
    }

    print_report(&report, &args, config, output)
}

fn print_report(
    report: &SynthReport,
    args: &SynthArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    output.success(&format!(
        "Synthesized {} file(s) across {} project(s)",
        report.generated.len(),
        report.projects,
    ))?;

    if config.synth.show_start {
        if let Some(menu) = &report.start {
            output.start_menu(menu)?;
        }
    }

    if config.synth.show_tips && !args.no_tips {
        output.tips(&report.tips)?;
    }

    Ok(())
}
