//! `trellis find`: which project generates a path.

use serde::Serialize;
use trellis_core::domain::{FileRef, ProjectTree};

use crate::{
    cli::{FindArgs, GlobalArgs, OutputFormat},
    definition::ProjectDefinition,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct Found<'a> {
    project: &'a str,
    outdir: &'a std::path::Path,
    path: &'a std::path::Path,
}

pub fn execute(args: FindArgs, global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    let dir = global
        .working_dir()
        .with_cli_context(|| "Failed to resolve the working directory")?;
    let tree = ProjectDefinition::load(&dir)?.build(&dir)?;

    let file = lookup(&tree, &args)?;
    let owner = tree.project(file.component.project)?;
    let found = Found {
        project: owner.name(),
        outdir: owner.outdir(),
        path: file.path.as_path(),
    };

    if output.format() == OutputFormat::Json {
        output.json(&found)?;
    } else {
        output.print(&format!(
            "{} ({}) -> {}",
            found.project,
            found.outdir.display(),
            found.path.display()
        ))?;
    }
    Ok(())
}

fn lookup(tree: &ProjectTree, args: &FindArgs) -> CliResult<FileRef> {
    tree.find_file(tree.root_id(), &args.path)?
        .ok_or_else(|| CliError::FileNotFound {
            path: args.path.clone(),
        })
}
