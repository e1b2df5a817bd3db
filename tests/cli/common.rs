//! Cross-cutting CLI tests (help, version, error handling)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help() {
    cargo_bin_cmd!("story-checklist")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("prepublish rules"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("story-checklist")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand() {
    cargo_bin_cmd!("story-checklist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    cargo_bin_cmd!("story-checklist")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_check_help() {
    cargo_bin_cmd!("story-checklist")
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Run the prepublish checklist"));
}

#[test]
fn test_invalid_format() {
    cargo_bin_cmd!("story-checklist")
        .args(["check", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
