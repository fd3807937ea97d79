//! `trellis files`: list the generated files a project declares.

use std::path::PathBuf;

use serde::Serialize;
use trellis_core::domain::{ProjectTree, paths::resolve};

use crate::{
    cli::{FilesArgs, GlobalArgs, OutputFormat},
    definition::ProjectDefinition,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct FileEntry {
    path: PathBuf,
    absolute: PathBuf,
}

pub fn execute(args: FilesArgs, global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    let dir = global
        .working_dir()
        .with_cli_context(|| "Failed to resolve the working directory")?;
    let tree = ProjectDefinition::load(&dir)?.build(&dir)?;

    let entries: Vec<FileEntry> = select(&tree, args.project)?
        .into_iter()
        .map(|file| FileEntry {
            path: file.path.into_path_buf(),
            absolute: file.absolute,
        })
        .collect();

    if output.format() == OutputFormat::Json {
        output.json(&entries)?;
        return Ok(());
    }

    if entries.is_empty() {
        output.info("No generated files")?;
    }
    for entry in &entries {
        output.print(&entry.path.display().to_string())?;
    }
    Ok(())
}

/// Files of the root, or of the project whose outdir is `project`
/// (relative to the root's outdir).
fn select(
    tree: &ProjectTree,
    project: Option<PathBuf>,
) -> CliResult<Vec<trellis_core::domain::FileRef>> {
    let root = tree.root_id();
    let Some(project) = project else {
        return Ok(tree.files(root)?);
    };

    let outdir = resolve(tree.outdir(root)?, &project);
    let node = tree
        .projects()
        .find(|node| node.outdir() == outdir)
        .ok_or(CliError::ProjectNotFound { outdir })?;
    Ok(node.files())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const DEFINITION: &str = r#"
outdir = "out"
[[files]]
path = "root.txt"

[[subprojects]]
outdir = "pkg"

[[subprojects.files]]
path = "inner.txt"
"#;

    fn tree() -> ProjectTree {
        ProjectDefinition::parse(Path::new("x"), DEFINITION)
            .unwrap()
            .build(Path::new("/w"))
            .unwrap()
    }

    fn paths(files: Vec<trellis_core::domain::FileRef>) -> Vec<PathBuf> {
        files.into_iter().map(|f| f.path.into_path_buf()).collect()
    }

    #[test]
    fn root_files_by_default() {
        let files = paths(select(&tree(), None).unwrap());
        assert!(files.contains(&PathBuf::from("root.txt")));
        assert!(!files.contains(&PathBuf::from("inner.txt")));
    }

    #[test]
    fn subproject_by_outdir() {
        let files = paths(select(&tree(), Some("pkg".into())).unwrap());
        assert!(files.contains(&PathBuf::from("inner.txt")));
    }

    #[test]
    fn unknown_outdir_is_not_found() {
        assert!(matches!(
            select(&tree(), Some("nope".into())),
            Err(CliError::ProjectNotFound { .. })
        ));
    }
}
