//! End-to-end synthesis against a real directory.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use trellis_adapters::{LocalFilesystem, ManifestCleanup};
use trellis_core::application::{FileOptions, SynthContext, SynthService};
use trellis_core::components::{LaunchConfiguration, SampleFile, TextFile};
use trellis_core::domain::{
    Component, DomainError, ProjectId, ProjectOptions, ProjectTree, RelativePath,
};
use trellis_core::error::TrellisResult;

fn service() -> SynthService {
    SynthService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(ManifestCleanup::new(LocalFilesystem::new())),
    )
}

fn tree(temp: &TempDir) -> (ProjectTree, ProjectId, ProjectId) {
    let mut tree = ProjectTree::root_in(ProjectOptions::root("proj"), temp.path()).unwrap();
    let root = tree.root_id();
    let pkg = tree.create(ProjectOptions::subproject(root, "pkg")).unwrap();
    tree.add_component(root, TextFile::new("hello.txt").with_line("hello"))
        .unwrap();
    tree.add_component(pkg, TextFile::new("inner.txt").with_line("inner"))
        .unwrap();
    (tree, root, pkg)
}

/// Copies a sub-project's output into a summary once everything is written.
struct Summary;

impl Component for Summary {
    fn name(&self) -> &str {
        "Summary"
    }

    fn post_synthesize(&mut self, ctx: &mut SynthContext<'_>) -> TrellisResult<()> {
        let inner = ctx.read_file("pkg/inner.txt")?;
        ctx.write_file(
            &RelativePath::new("summary.txt"),
            &format!("pkg says: {inner}"),
            FileOptions::default(),
        )?;
        Ok(())
    }
}

#[test]
fn writes_files_of_every_project() {
    let temp = TempDir::new().unwrap();
    let (mut tree, _, _) = tree(&temp);

    let report = service().synth(&mut tree).unwrap();

    let out = temp.path().join("proj");
    assert_eq!(fs::read_to_string(out.join("hello.txt")).unwrap(), "hello\n");
    assert_eq!(fs::read_to_string(out.join("pkg/inner.txt")).unwrap(), "inner\n");
    assert!(out.join(".gitignore").exists());
    assert!(out.join("pkg/.gitignore").exists());
    assert_eq!(fs::read_to_string(out.join("README.md")).unwrap(), "# my project");
    assert!(out.join(".trellis/files.json").exists());
    assert!(out.join("pkg/.trellis/files.json").exists());
    assert_eq!(report.projects, 2);
    assert_eq!(report.generated.len(), 4);
}

#[test]
fn stale_output_is_removed_and_user_files_survive() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("proj");
    fs::create_dir_all(out.join(".trellis")).unwrap();
    fs::write(out.join("stale.txt"), "old").unwrap();
    fs::write(out.join("NOTES.txt"), "mine").unwrap();
    fs::write(
        out.join(".trellis/files.json"),
        r#"{"files": ["stale.txt"]}"#,
    )
    .unwrap();

    let (mut tree, _, _) = tree(&temp);
    service().synth(&mut tree).unwrap();

    assert!(!out.join("stale.txt").exists());
    assert_eq!(fs::read_to_string(out.join("NOTES.txt")).unwrap(), "mine");
    assert!(out.join("hello.txt").exists());
}

#[test]
fn dropped_component_output_disappears_on_next_run() {
    let temp = TempDir::new().unwrap();
    let (mut first, root, _) = tree(&temp);
    first.add_component(root, TextFile::new("extra.txt")).unwrap();
    service().synth(&mut first).unwrap();
    let out = temp.path().join("proj");
    assert!(out.join("extra.txt").exists());

    let (mut second, _, _) = tree(&temp);
    service().synth(&mut second).unwrap();
    assert!(!out.join("extra.txt").exists());
    assert!(out.join("hello.txt").exists());
    assert!(out.join("pkg/inner.txt").exists());
}

#[test]
fn samples_are_written_once_and_kept() {
    let temp = TempDir::new().unwrap();
    let (mut tree1, root, _) = tree(&temp);
    tree1
        .add_component(root, SampleFile::new("src/main.txt", "start here"))
        .unwrap();
    service().synth(&mut tree1).unwrap();

    let sample = temp.path().join("proj/src/main.txt");
    fs::write(&sample, "edited").unwrap();

    let (mut tree2, root, _) = tree(&temp);
    tree2
        .add_component(root, SampleFile::new("src/main.txt", "start here"))
        .unwrap();
    service().synth(&mut tree2).unwrap();
    assert_eq!(fs::read_to_string(&sample).unwrap(), "edited");
}

#[test]
fn parent_post_synthesize_sees_subproject_output() {
    let temp = TempDir::new().unwrap();
    let (mut tree, root, _) = tree(&temp);
    tree.add_component(root, Summary).unwrap();

    service().synth(&mut tree).unwrap();

    let summary = fs::read_to_string(temp.path().join("proj/summary.txt")).unwrap();
    assert_eq!(summary, "pkg says: inner\n");
}

#[test]
fn files_match_components_after_synthesis() {
    let temp = TempDir::new().unwrap();
    let (mut tree, root, pkg) = tree(&temp);
    service().synth(&mut tree).unwrap();

    for project in [root, pkg] {
        for file in tree.files(project).unwrap() {
            assert!(file.absolute.exists(), "{} missing", file.absolute.display());
        }
    }
}

#[cfg(unix)]
#[test]
fn generated_files_are_read_only_and_resynthesis_still_works() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let (mut tree1, _, _) = tree(&temp);
    service().synth(&mut tree1).unwrap();

    let hello = temp.path().join("proj/hello.txt");
    let mode = fs::metadata(&hello).unwrap().permissions().mode();
    assert_eq!(mode & 0o222, 0);

    let (mut tree2, _, _) = tree(&temp);
    service().synth(&mut tree2).unwrap();
    assert!(Path::new(&hello).exists());
}

#[test]
fn failing_construction_leaves_nothing_on_disk() {
    let temp = TempDir::new().unwrap();
    let err = ProjectTree::root_in(ProjectOptions::default(), temp.path()).unwrap_err();
    assert!(err.to_string().contains(".trellisrc.toml"));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn overlapping_siblings_cannot_erase_each_other() {
    let temp = TempDir::new().unwrap();
    let mut tree = ProjectTree::root_in(ProjectOptions::root("proj"), temp.path()).unwrap();
    let root = tree.root_id();
    let nested = tree.create(ProjectOptions::subproject(root, "a/b")).unwrap();
    tree.add_component(nested, TextFile::new("inner.txt").with_line("inner"))
        .unwrap();

    let err = tree.create(ProjectOptions::subproject(root, "a")).unwrap_err();
    assert!(matches!(err, DomainError::InvalidOutdir { .. }));

    // The same layout expressed as a chain keeps every file.
    let a = tree.create(ProjectOptions::subproject(root, "other")).unwrap();
    let b = tree.create(ProjectOptions::subproject(a, "b")).unwrap();
    tree.add_component(a, TextFile::new("outer.txt")).unwrap();
    tree.add_component(b, TextFile::new("inner.txt")).unwrap();

    service().synth(&mut tree).unwrap();
    service().synth(&mut tree).unwrap();

    let out = temp.path().join("proj");
    assert!(out.join("a/b/inner.txt").exists());
    assert!(out.join("other/outer.txt").exists());
    assert!(out.join("other/b/inner.txt").exists());
}

#[test]
fn launch_configuration_is_a_listed_file() {
    let temp = TempDir::new().unwrap();
    let (mut tree, root, _) = tree(&temp);
    tree.vscode_mut(root)
        .unwrap()
        .add_configuration(LaunchConfiguration::launch("debug", "node").with_program("index.js"));

    service().synth(&mut tree).unwrap();

    let found = tree
        .find_file(root, ".vscode/launch.json")
        .unwrap()
        .expect("launch.json should be a file component");
    assert!(found.absolute.exists());
    let launch = fs::read_to_string(&found.absolute).unwrap();
    assert!(launch.contains("\"program\": \"index.js\""));
}
