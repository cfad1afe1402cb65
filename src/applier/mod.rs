//! Patch application orchestration
//!
//! [`PatchApplier`] drives a full apply run through its phases:
//!
//! ```text
//! Validating -> Staging -> Extracting -> Executing -> Swapping -> Done
//! ```
//!
//! Any phase can fail, and every failure aborts the run immediately. The
//! all-or-nothing guarantee comes from never mutating the real target:
//! commands run against a staged copy, and only a staging directory that
//! survived every command is swapped into the target's place.
//!
//! The swap itself is rename-based. Staging lives next to the target (same
//! volume), so finalizing a run is: rename the old target aside, rename the
//! staged tree to the target's path, then delete the displaced old tree.
//! The caller-visible inconsistency window is a single directory rename.
//! If the process dies between the two renames, the target name is missing
//! while the old content sits intact under its aside-name; that residual
//! window is a known limitation of the maneuver.

use crate::archive::{self, MANIFEST_NAME};
use crate::core::{Result, WarupError};
use crate::manifest::CommandParser;
use crate::utils::fs::{copy_tree, remove_tree};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Applies packaged update archives to a directory tree.
///
/// The applier holds only immutable configuration (the command pattern
/// table); each [`apply`](Self::apply) call is an independent run with its
/// own staging and extraction directories. Concurrent runs against the same
/// target are not coordinated - callers must serialize them.
pub struct PatchApplier {
    parser: CommandParser,
}

impl PatchApplier {
    /// Creates an applier with the standard command grammars.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: CommandParser::new(),
        }
    }

    /// Tells whether `archive` is a valid warup update package.
    ///
    /// This is a cheap pre-check using only the archive's entry listing:
    /// true iff the archive can be opened and lists a top-level
    /// `batch.warup` entry. Never fails - any I/O problem reports `false`.
    ///
    /// Calling this before [`apply`](Self::apply) is recommended but not
    /// mandatory; `apply` performs its own (post-extraction) check.
    #[must_use]
    pub fn accepts(&self, archive: &Path) -> bool {
        archive::contains_manifest(archive)
    }

    /// Applies the update in `archive` to `target`, returning the updated
    /// target path.
    ///
    /// On success the target directory contains exactly the staged result of
    /// executing every descriptor command in file order. On failure a typed
    /// error identifies the phase that aborted the run, and the target is
    /// untouched unless the failure happened inside the final swap (where
    /// the old tree is restored if the swap cannot complete).
    ///
    /// Temporary directories from a failed run (the staging copy, the
    /// extracted archive) are left behind for diagnosis where cleanup is not
    /// possible; extraction cleanup is best-effort on every outcome.
    ///
    /// # Errors
    ///
    /// See [`WarupError`] for the failure families; all are fatal to the
    /// run and none are retried internally.
    pub fn apply(&self, archive: &Path, target: &Path) -> Result<PathBuf> {
        validate_target(target)?;

        info!("Applying {} to {}", archive.display(), target.display());
        let staging = stage(target)?;
        let unpacked = archive::extract_to_temp(archive)?;

        let outcome = self
            .execute_manifest(&unpacked, &staging)
            .and_then(|()| swap(target, &staging));

        // Cleanup of the extraction area is best-effort on both outcomes
        if let Err(e) = fs::remove_dir_all(&unpacked) {
            warn!("Could not clean up extraction directory {}: {e}", unpacked.display());
        }

        outcome?;
        info!("Update applied to {}", target.display());
        Ok(target.to_path_buf())
    }

    /// Reads the descriptor line by line and executes each command against
    /// the staging copy, in file order.
    fn execute_manifest(&self, unpacked: &Path, staging: &Path) -> Result<()> {
        let manifest = unpacked.join(MANIFEST_NAME);
        if !manifest.is_file() {
            return Err(WarupError::NoUpdateDescriptor {
                reason: "could not find patch file".to_string(),
            });
        }

        let reader = BufReader::new(File::open(&manifest).map_err(|e| {
            WarupError::NoUpdateDescriptor {
                reason: format!("could not open patch file: {e}"),
            }
        })?);

        for line in reader.lines() {
            let line = line?;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if line.trim().is_empty() {
                continue;
            }

            let command = self.parser.parse(line)?;
            command.execute(unpacked, staging)?;
        }

        Ok(())
    }
}

impl Default for PatchApplier {
    fn default() -> Self {
        Self::new()
    }
}

/// Target must exist, be a directory, and be writable - checked before any
/// temporary state is created.
fn validate_target(target: &Path) -> Result<()> {
    if !target.exists() {
        return Err(permission_error(target, "could not find target to apply to"));
    }
    if !target.is_dir() {
        return Err(permission_error(target, "target is not a directory"));
    }

    let metadata = fs::metadata(target)
        .map_err(|e| permission_error(target, &format!("could not inspect target: {e}")))?;
    if metadata.permissions().readonly() {
        return Err(permission_error(target, "target must be writable"));
    }

    Ok(())
}

fn permission_error(target: &Path, reason: &str) -> WarupError {
    WarupError::TargetDirectoryPermission {
        path: target.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Copies the target into a fresh staging directory next to it.
///
/// Staging is a sibling of the target on purpose: the final swap is then a
/// pair of same-volume renames instead of a cross-device copy.
fn stage(target: &Path) -> Result<PathBuf> {
    let parent = effective_parent(target);
    let staging = tempfile::Builder::new()
        .prefix(".warup-staging-")
        .tempdir_in(parent)
        .map_err(|e| WarupError::TemporaryCopy {
            from: target.display().to_string(),
            to: parent.display().to_string(),
            source: e,
        })?
        .keep();

    debug!("Staging {} into {}", target.display(), staging.display());
    copy_tree(target, &staging)?;
    Ok(staging)
}

/// Swaps the fully-built staging directory into the target's place.
///
/// Order matters: the old target is renamed aside first, then staging is
/// renamed in, and only once the new content is in place is the old tree
/// deleted. If the second rename fails the old target is renamed back.
fn swap(target: &Path, staging: &Path) -> Result<()> {
    let old_aside = unique_sibling(target, "warup-old");
    debug!("Swapping {} into place via {}", staging.display(), old_aside.display());

    fs::rename(target, &old_aside).map_err(|e| WarupError::TemporaryCopy {
        from: target.display().to_string(),
        to: old_aside.display().to_string(),
        source: e,
    })?;

    if let Err(e) = fs::rename(staging, target) {
        // Put the original back; the staged result stays on disk for diagnosis
        if let Err(restore) = fs::rename(&old_aside, target) {
            warn!(
                "Could not restore {} from {}: {restore}",
                target.display(),
                old_aside.display()
            );
        }
        return Err(WarupError::TemporaryCopy {
            from: staging.display().to_string(),
            to: target.display().to_string(),
            source: e,
        });
    }

    remove_tree(&old_aside)
}

/// Parent directory of `target`, falling back to `.` for bare names.
fn effective_parent(target: &Path) -> &Path {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// First non-existing `.{name}.{tag}-{pid}-{n}` sibling of `path`.
fn unique_sibling(path: &Path, tag: &str) -> PathBuf {
    let parent = effective_parent(path);
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    let pid = std::process::id();

    let mut counter = 0u32;
    loop {
        let candidate = parent.join(format!(".{name}.{tag}-{pid}-{counter}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
