//! Tests for the two-argument binary surface.

use crate::common::{ArchiveBuilder, assert_absent, assert_file, write_tree};
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn applies_an_update_and_reports_the_target() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("app");
    write_tree(&target, &[("old.txt", b"old")]);

    let archive = temp.path().join("update.zip");
    ArchiveBuilder::new()
        .manifest("rm --from=old.txt\nadd --from=new.txt --to=new.txt")
        .file("new.txt", b"new")
        .write_to(&archive);

    let mut cmd = Command::cargo_bin("warup").unwrap();
    cmd.arg(&archive)
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    assert_file(&target, "new.txt", b"new");
    assert_absent(&target, "old.txt");
}

#[test]
fn wrong_argument_count_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("warup").unwrap();
    cmd.assert().failure().stderr(predicate::str::contains("Usage"));

    let mut cmd = Command::cargo_bin("warup").unwrap();
    cmd.arg("only-one.zip").assert().failure().stderr(predicate::str::contains("Usage"));

    let mut cmd = Command::cargo_bin("warup").unwrap();
    cmd.args(["a.zip", "target", "extra"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_target_exits_nonzero_with_error_context() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("update.zip");
    ArchiveBuilder::new().manifest("rm --from=x").write_to(&archive);

    let mut cmd = Command::cargo_bin("warup").unwrap();
    cmd.arg(&archive)
        .arg(temp.path().join("no-such-dir"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn unparsable_descriptor_line_is_reported_verbatim() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("app");
    write_tree(&target, &[("keep.txt", b"keep")]);

    let archive = temp.path().join("update.zip");
    ArchiveBuilder::new().manifest("frobnicate --from=x").write_to(&archive);

    let mut cmd = Command::cargo_bin("warup").unwrap();
    cmd.arg(&archive)
        .arg(&target)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("frobnicate --from=x"));
}
