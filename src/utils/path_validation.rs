//! Path validation for update descriptor paths.
//!
//! Descriptor paths are always interpreted relative to a root (the archive
//! extraction directory or the staging copy of the target). This module
//! enforces that interpretation: a single leading separator is tolerated and
//! stripped, while anything that could escape the root is rejected.

use crate::core::{Result, WarupError};
use std::path::{Component, Path, PathBuf};

/// Sanitizes a descriptor path into a safe root-relative [`PathBuf`].
///
/// A single leading `/` is stripped (descriptors produced on some platforms
/// write absolute-looking paths). After stripping, the path must be purely
/// relative: `..` components and filesystem prefixes are rejected so a
/// descriptor cannot address anything outside the root it is resolved
/// against. `.` components are dropped.
///
/// # Errors
///
/// Returns [`WarupError::UnsafePath`] naming the offending path as written.
pub fn sanitize_relative(raw: &str) -> Result<PathBuf> {
    let trimmed = raw.strip_prefix('/').unwrap_or(raw);

    if trimmed.is_empty() {
        return Err(unsafe_path(raw));
    }

    let mut clean = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(unsafe_path(raw));
            }
        }
    }

    if clean.as_os_str().is_empty() {
        return Err(unsafe_path(raw));
    }

    Ok(clean)
}

fn unsafe_path(raw: &str) -> WarupError {
    WarupError::UnsafePath {
        path: raw.to_string(),
    }
}
