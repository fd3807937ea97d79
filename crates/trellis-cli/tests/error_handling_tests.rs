//! Exit codes and suggestions for failing commands.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn trellis(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("trellis");
    cmd.current_dir(dir)
        .arg("--no-color");
    cmd
}

fn with_definition(definition: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".trellisrc.toml"), definition).unwrap();
    temp
}

#[test]
fn synth_without_definition_suggests_init() {
    let temp = TempDir::new().unwrap();

    trellis(temp.path())
        .arg("synth")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("trellis init"));
}

#[test]
fn invalid_definition_is_user_error() {
    let temp = with_definition("nmae = \"typo\"\n");

    trellis(temp.path())
        .arg("synth")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project definition"));
}

#[test]
fn duplicate_outdir_is_rejected_before_writing() {
    let temp = with_definition(
        r#"
[[files]]
path = "root.txt"

[[subprojects]]
outdir = "pkg"

[[subprojects]]
outdir = "pkg"
"#,
    );

    trellis(temp.path())
        .arg("synth")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pkg"));
    assert!(!temp.path().join("root.txt").exists());
}

#[test]
fn subproject_escaping_parent_is_rejected() {
    let temp = with_definition(
        r#"
[[subprojects]]
outdir = "../outside"
"#,
    );

    trellis(temp.path()).arg("synth").assert().code(2);
}

#[test]
fn init_refuses_to_overwrite() {
    let temp = with_definition("name = \"mine\"\n");

    trellis(temp.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
    assert_eq!(
        fs::read_to_string(temp.path().join(".trellisrc.toml")).unwrap(),
        "name = \"mine\"\n"
    );

    trellis(temp.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn find_unknown_file_is_not_found() {
    let temp = with_definition("name = \"demo\"\n");

    trellis(temp.path())
        .args(["find", "nope.txt"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("trellis files"));
}

#[test]
fn unknown_config_key() {
    let temp = TempDir::new().unwrap();

    trellis(temp.path())
        .args(["config", "get", "no.such.key"])
        .assert()
        .code(4);
}
