//! Common test utilities and fixtures for warup integration tests
//!
//! Consolidates the fixture patterns the suite needs: building update
//! archives and populating/inspecting target trees.

// Allow dead code because these utilities are shared across test files and
// not all of them are used in every file
#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Name of the descriptor entry an update archive carries.
pub const MANIFEST_NAME: &str = "batch.warup";

/// Initialize test logging once; honors `RUST_LOG`.
pub fn init() {
    warup::test_utils::init_test_logging(None);
}

/// Builder for update archives used as test fixtures.
///
/// ```rust,ignore
/// ArchiveBuilder::new()
///     .manifest("rm --from=old.txt\nadd --from=new.txt --to=new.txt")
///     .file("new.txt", b"fresh content")
///     .write_to(&archive_path);
/// ```
pub struct ArchiveBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add the `batch.warup` descriptor with the given text.
    pub fn manifest(self, text: &str) -> Self {
        self.file(MANIFEST_NAME, text.as_bytes())
    }

    /// Add a payload file entry.
    pub fn file(mut self, name: &str, content: &[u8]) -> Self {
        self.entries.push((name.to_string(), content.to_vec()));
        self
    }

    /// Write the archive to `path`.
    pub fn write_to(self, path: &Path) {
        let mut writer = ZipWriter::new(File::create(path).expect("create archive file"));
        for (name, content) in &self.entries {
            writer
                .start_file(name.as_str(), SimpleFileOptions::default())
                .expect("start archive entry");
            writer.write_all(content).expect("write archive entry");
        }
        writer.finish().expect("finish archive");
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Populate a directory with `(relative path, content)` files, creating
/// parent directories as needed.
pub fn write_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, content).expect("write tree file");
    }
}

/// Assert a file exists under `root` with exactly `expected` as content.
pub fn assert_file(root: &Path, relative: &str, expected: &[u8]) {
    let path = root.join(relative);
    let actual = fs::read(&path)
        .unwrap_or_else(|e| panic!("expected {} to be readable: {e}", path.display()));
    assert_eq!(actual, expected, "content mismatch for {}", path.display());
}

/// Assert nothing exists at `root/relative`.
pub fn assert_absent(root: &Path, relative: &str) {
    let path = root.join(relative);
    assert!(!path.exists(), "expected {} to be absent", path.display());
}
