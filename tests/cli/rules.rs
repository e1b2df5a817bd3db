//! Rules subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_rules_lists_every_tier() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("story-checklist")
        .arg("rules")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("story-missing-title"))
        .stdout(predicate::str::contains("page-too-many-links"))
        .stdout(predicate::str::contains("element:video"))
        .stdout(predicate::str::contains("story-amp-validation"))
        .stdout(predicate::str::contains("guidance"));
}

#[test]
fn test_rules_respects_disabled_rules() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("story-checklist.toml"),
        "disabled_rules = [\"video-missing-poster\", \"story-amp-validation\"]\n",
    )
    .unwrap();

    cargo_bin_cmd!("story-checklist")
        .arg("rules")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("video-missing-poster").not())
        .stdout(predicate::str::contains("story-amp-validation").not())
        .stdout(predicate::str::contains("video-missing-captions"));
}
