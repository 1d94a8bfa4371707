//! Integration tests for top-level argument handling.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("ocrtable").unwrap()
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ocrtable"));
}

#[test]
fn no_subcommand_fails() {
    cmd().assert().failure();
}

#[test]
fn render_help_lists_formats() {
    cmd()
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clipboard"))
        .stdout(predicate::str::contains("--trim-trailing-tabs"));
}

#[test]
fn invalid_format_value() {
    cmd()
        .args(["render", "resp.json", "--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
