//! Integration tests for the `export` subcommand.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn cmd() -> Command {
    Command::cargo_bin("ocrtable").unwrap()
}

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
        .join(name)
        .to_str()
        .unwrap()
        .to_string()
}

#[test]
fn export_writes_xlsx() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("sales.xlsx");

    cmd()
        .args([
            "export",
            &fixture("baidu_sales.json"),
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"))
        .stdout(predicate::str::contains("(4 x 3)"));

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"PK"), "xlsx is a zip archive");
}

#[test]
fn export_with_sheet_options() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("inventory.xlsx");

    cmd()
        .args([
            "export",
            &fixture("aliyun_inventory.json"),
            "-o",
            out.to_str().unwrap(),
            "--sheet-name",
            "Inventory",
            "--max-column-width",
            "30",
            "--store-numbers",
        ])
        .assert()
        .success();

    assert!(out.exists());
}

#[test]
fn export_second_table() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("second.xlsx");

    cmd()
        .args([
            "export",
            &fixture("tencent_two_tables.json"),
            "-o",
            out.to_str().unwrap(),
            "--table",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 x 2)"));
}

#[test]
fn export_empty_response_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("empty.xlsx");

    cmd()
        .args([
            "export",
            &fixture("baidu_empty.json"),
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("No table found.\n");

    assert!(!out.exists());
}

#[test]
fn export_rejects_narrow_max_width() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("narrow.xlsx");

    cmd()
        .args([
            "export",
            &fixture("canonical_simple.json"),
            "-o",
            out.to_str().unwrap(),
            "--max-column-width",
            "2",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--max-column-width"));
}

#[test]
fn export_to_missing_directory_fails() {
    cmd()
        .args([
            "export",
            &fixture("canonical_simple.json"),
            "-o",
            "/nonexistent/dir/out.xlsx",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: failed to write"));
}

#[test]
fn export_vendor_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("err.xlsx");

    cmd()
        .args([
            "export",
            &fixture("tencent_error.json"),
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AuthFailure.SignatureExpire"));
}
