//! Pre-check (`accepts`) behavior against real archives.

use crate::common::ArchiveBuilder;
use std::fs;
use tempfile::TempDir;
use warup::applier::PatchApplier;

#[test]
fn accepts_archive_with_descriptor() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("update.zip");
    ArchiveBuilder::new().manifest("rm --from=old.txt").file("payload", b"x").write_to(&archive);

    assert!(PatchApplier::new().accepts(&archive));
}

#[test]
fn rejects_archive_without_descriptor() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("update.zip");
    ArchiveBuilder::new().file("payload", b"x").write_to(&archive);

    assert!(!PatchApplier::new().accepts(&archive));
}

#[test]
fn rejects_descriptor_below_top_level() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("update.zip");
    ArchiveBuilder::new().file("nested/batch.warup", b"rm --from=x").write_to(&archive);

    assert!(!PatchApplier::new().accepts(&archive));
}

#[test]
fn never_fails_on_missing_or_corrupt_files() {
    let temp = TempDir::new().unwrap();
    let applier = PatchApplier::new();

    assert!(!applier.accepts(&temp.path().join("does-not-exist.zip")));

    let corrupt = temp.path().join("corrupt.zip");
    fs::write(&corrupt, b"definitely not a zip archive").unwrap();
    assert!(!applier.accepts(&corrupt));

    // A directory is not an archive either
    assert!(!applier.accepts(temp.path()));
}
