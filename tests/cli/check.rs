//! Check subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const UNTITLED: &str = r#"{"id": 1, "title": "", "pages": [{"id": "p1", "elements": []}]}"#;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("checklist")
        .join(name)
}

#[test]
fn test_check_stdin() {
    cargo_bin_cmd!("story-checklist")
        .arg("check")
        .write_stdin(UNTITLED)
        .assert()
        .success()
        .stdout(predicate::str::contains("[story-missing-title]"))
        .stdout(predicate::str::contains("<stdin>"))
        .stdout(predicate::str::contains("[story-too-short]"));
}

#[test]
fn test_check_clean_file() {
    let path = fixture("well_formed.json");
    cargo_bin_cmd!("story-checklist")
        .args(["check", "--check", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_check_exits_with_error_code() {
    cargo_bin_cmd!("story-checklist")
        .args(["check", "--check"])
        .write_stdin(UNTITLED)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[story-missing-title]"));
}

#[test]
fn test_check_guidance_only_passes() {
    // Only warnings and guidance: --check does not fail.
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join(".story-checklist.toml");
    fs::write(
        &config,
        "disabled_rules = [\"story-missing-title\", \"story-missing-cover\"]\n",
    )
    .unwrap();
    let story = temp_dir.path().join("story.json");
    fs::write(&story, UNTITLED).unwrap();

    cargo_bin_cmd!("story-checklist")
        .args(["check", "--check", story.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("[story-missing-title]").not())
        .stdout(predicate::str::contains("[story-too-short]"));
}

#[test]
fn test_check_json_output() {
    let output = cargo_bin_cmd!("story-checklist")
        .args(["check", "--format", "json"])
        .write_stdin(UNTITLED)
        .output()
        .unwrap();
    assert!(output.status.success());

    let diagnostics: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = &diagnostics[0];
    assert_eq!(first["type"], "error");
    assert_eq!(first["code"], "story-missing-title");
    assert_eq!(first["storyId"], 1);
}

#[test]
fn test_check_explicit_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("custom.toml");
    fs::write(&config, "disabled_rules = [\"story-too-short\"]\n").unwrap();

    cargo_bin_cmd!("story-checklist")
        .args(["check", "--config", config.to_str().unwrap()])
        .write_stdin(UNTITLED)
        .assert()
        .success()
        .stdout(predicate::str::contains("[story-too-short]").not());
}

#[test]
fn test_check_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("broken.toml");
    fs::write(&config, "disabled_rules = 3\n").unwrap();

    cargo_bin_cmd!("story-checklist")
        .args(["check", "--config", config.to_str().unwrap()])
        .write_stdin(UNTITLED)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn test_check_invalid_story() {
    cargo_bin_cmd!("story-checklist")
        .arg("check")
        .write_stdin(r#"{"id": 1, "title": "No pages"}"#)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid story document"));
}

#[test]
fn test_check_missing_file() {
    cargo_bin_cmd!("story-checklist")
        .args(["check", "does-not-exist.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_check_reports_page_location() {
    let path = fixture("attachment_conflict.json");
    cargo_bin_cmd!("story-checklist")
        .args(["check", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("[page-attachment-link-conflict]"))
        .stdout(predicate::str::contains("pages p1"));
}
