//! File system utilities for warup
//!
//! This module provides the two tree primitives every apply run is built
//! from: a recursive, structure-preserving copy and a recursive, fail-fast
//! removal. Both operate on whole subtrees and surface typed errors that
//! name the operation and the paths involved.
//!
//! # Examples
//!
//! ```rust,no_run
//! use warup::utils::fs::{copy_tree, remove_tree};
//! use std::path::Path;
//!
//! # fn example() -> warup::core::Result<()> {
//! copy_tree(Path::new("app"), Path::new("/tmp/app-staging"))?;
//! remove_tree(Path::new("/tmp/app-staging"))?;
//! # Ok(())
//! # }
//! ```

use crate::core::{Result, WarupError};
use std::fs;
use std::path::Path;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Ensures a directory exists, creating it and all parents if necessary.
///
/// Returns an error if the path exists but is not a directory.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
    } else if path.is_dir() {
        Ok(())
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", path.display()),
        ))
    }
}

/// Recursively copies a directory subtree, preserving relative structure.
///
/// Walks `source` top-down; every directory and file encountered (including
/// the root) is re-rooted under `target` at the same source-relative path.
/// Directories are created as needed and existing files at the destination
/// are overwritten. A directory at the destination that conflicts with a
/// file source (or vice versa) fails rather than silently coercing.
///
/// `source` may also be a plain file, in which case it is copied onto
/// `target` directly. `source` is never mutated.
///
/// # Errors
///
/// Any I/O failure during the walk aborts the whole copy and surfaces
/// [`WarupError::TemporaryCopy`] wrapping the underlying cause. No partial
/// recovery is attempted; entries copied before the failure are left behind.
pub fn copy_tree(source: &Path, target: &Path) -> Result<()> {
    debug!("Copying tree {} -> {}", source.display(), target.display());
    copy_tree_inner(source, target).map_err(|e| WarupError::TemporaryCopy {
        from: source.display().to_string(),
        to: target.display().to_string(),
        source: e,
    })
}

fn copy_tree_inner(source: &Path, target: &Path) -> std::io::Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| {
            e.into_io_error().unwrap_or_else(|| std::io::Error::other("walk aborted"))
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        // join("") would leave a trailing separator on the root entry
        let destination = if relative.as_os_str().is_empty() {
            target.to_path_buf()
        } else {
            target.join(relative)
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            if destination.exists() && !destination.is_dir() {
                return Err(conflict(entry.path(), &destination));
            }
            ensure_dir(&destination)?;
        } else if file_type.is_file() {
            if destination.is_dir() {
                return Err(conflict(entry.path(), &destination));
            }
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            trace!("copy {} -> {}", entry.path().display(), destination.display());
            fs::copy(entry.path(), &destination)?;
        }
        // Symlinks and special files are not part of the copy contract
    }
    Ok(())
}

fn conflict(source: &Path, destination: &Path) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        format!(
            "cannot copy {} over {}: file/directory conflict",
            source.display(),
            destination.display()
        ),
    )
}

/// Recursively removes a file or directory subtree.
///
/// Directories are removed post-order: every child is deleted before its
/// parent. Plain files are removed directly.
///
/// # Errors
///
/// The first deletion failure aborts immediately with
/// [`WarupError::PathDeletion`] naming the offending path and wrapping the
/// underlying cause. Siblings of the failed path are not attempted
/// afterwards; removal is fail-fast, not best-effort.
pub fn remove_tree(path: &Path) -> Result<()> {
    debug!("Removing tree {}", path.display());

    let file_type = path
        .symlink_metadata()
        .map_err(|e| deletion_error(path, e))?
        .file_type();

    if file_type.is_dir() {
        for entry in fs::read_dir(path).map_err(|e| deletion_error(path, e))? {
            let entry = entry.map_err(|e| deletion_error(path, e))?;
            remove_tree(&entry.path())?;
        }
        fs::remove_dir(path).map_err(|e| deletion_error(path, e))
    } else {
        fs::remove_file(path).map_err(|e| deletion_error(path, e))
    }
}

fn deletion_error(path: &Path, source: std::io::Error) -> WarupError {
    WarupError::PathDeletion {
        path: path.display().to_string(),
        source,
    }
}
