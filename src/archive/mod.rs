//! Update archive extraction
//!
//! An update archive is a plain zip container. Its entries are payload files
//! addressed by relative path, plus the top-level [`MANIFEST_NAME`]
//! descriptor that lists the operations to apply. This module owns the
//! extraction contract: unpack every file entry into a fresh temporary
//! directory, recreating intermediate directories as needed.
//!
//! Extraction is deliberately dumb - it does not look inside the descriptor.
//! Whether the archive actually contains one is checked by the applier after
//! extraction, or cheaply up front via [`contains_manifest`].

use crate::core::{Result, WarupError};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use zip::ZipArchive;
use zip::result::ZipError;

/// Name of the update descriptor every archive must carry at its top level.
pub const MANIFEST_NAME: &str = "batch.warup";

/// Tells whether `archive` lists an update descriptor, using only the entry
/// listing - no extraction is performed.
///
/// Never fails: any I/O or format problem simply reports `false`.
#[must_use]
pub fn contains_manifest(archive: &Path) -> bool {
    let Ok(file) = File::open(archive) else {
        return false;
    };
    match ZipArchive::new(file) {
        Ok(zip) => zip.index_for_name(MANIFEST_NAME).is_some(),
        Err(_) => false,
    }
}

/// Extracts all non-directory entries of `archive` into a freshly created
/// temporary directory and returns its path.
///
/// Entries are visited in the archive's natural order. Directory entries are
/// skipped; directories are created implicitly from file paths. Each entry's
/// stored relative path is re-rooted under the extraction directory, with
/// entry names resolved through the zip crate's `enclosed_name` so a hostile
/// archive cannot write outside the extraction root.
///
/// The caller owns the returned directory and is responsible for removing
/// it; it is intentionally not deleted on drop so a failed run leaves the
/// extracted contents behind for diagnosis.
///
/// # Errors
///
/// Returns [`WarupError::UpdateUnzip`] if the archive cannot be opened, an
/// entry name is unsafe, a parent directory cannot be created, or an entry's
/// byte stream cannot be copied. The first failure aborts extraction of the
/// remaining entries.
pub fn extract_to_temp(archive: &Path) -> Result<PathBuf> {
    let extract_dir = tempfile::Builder::new()
        .prefix("warup-unpack-")
        .tempdir()?
        .keep();
    debug!("Extracting {} into {}", archive.display(), extract_dir.display());

    extract_into(archive, &extract_dir).map_err(|e| WarupError::UpdateUnzip {
        archive: archive.display().to_string(),
        source: e,
    })?;

    Ok(extract_dir)
}

fn extract_into(archive: &Path, extract_dir: &Path) -> std::result::Result<(), ZipError> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(file)?;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let Some(relative) = entry.enclosed_name() else {
            return Err(ZipError::InvalidArchive("entry path escapes the extraction directory".into()));
        };

        let destination = extract_dir.join(relative);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        trace!("unpack {} -> {}", entry.name(), destination.display());
        let mut out = File::create(&destination)?;
        io::copy(&mut entry, &mut out)?;
    }

    Ok(())
}
