//! Update descriptor commands and their parser
//!
//! The `batch.warup` descriptor is a plain text file with one command per
//! line. Exactly two grammars are recognized:
//!
//! ```text
//! add --from=<path> --to=<path>
//! replace --from=<path> --to=<path>
//! rm --from=<path>
//! ```
//!
//! `add` and `replace` share one handler and are behaviorally identical:
//! both copy the archive-rooted source onto the target-rooted destination,
//! overwriting whatever is there. `rm` deletes the target-rooted path,
//! recursively for directories.
//!
//! Paths are any run of non-space characters; a single leading `/` is
//! tolerated and stripped. Command order in the file is significant - later
//! commands observe the effects of earlier ones within the same run.

use crate::core::{Result, WarupError};
use crate::utils::fs::{copy_tree, remove_tree};
use crate::utils::path_validation::sanitize_relative;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single mutation of the staged target tree.
///
/// Commands are a closed set: the descriptor grammar admits exactly these
/// two shapes, and dispatch happens by matching on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Copy `source` (file or subtree, relative to the archive root) onto
    /// `target` (relative to the staged target root), overwriting any
    /// existing entry at the destination.
    AddOrReplace {
        /// Archive-rooted source path
        source: PathBuf,
        /// Target-rooted destination path
        target: PathBuf,
    },
    /// Delete `target` (relative to the staged target root), recursively if
    /// it is a directory.
    Remove {
        /// Target-rooted path to delete
        target: PathBuf,
    },
}

impl Command {
    /// Executes this command against the given roots.
    ///
    /// `source_root` is the archive extraction directory and `target_root`
    /// the staging copy of the target. Relative paths stored in the command
    /// are resolved against those roots at execution time.
    pub fn execute(&self, source_root: &Path, target_root: &Path) -> Result<()> {
        match self {
            Self::AddOrReplace { source, target } => {
                debug!("add/replace {} -> {}", source.display(), target.display());
                copy_tree(&source_root.join(source), &target_root.join(target))
            }
            Self::Remove { target } => {
                debug!("rm {}", target.display());
                remove_tree(&target_root.join(target))
            }
        }
    }
}

/// Parses descriptor lines into [`Command`]s via an ordered pattern table.
///
/// The table is immutable, process-lifetime configuration: each pattern is
/// tried in a fixed, deterministic order and the first one whose regular
/// expression fully matches the line wins. Ordering is the only
/// disambiguation between grammars.
pub struct CommandParser {
    patterns: Vec<(Regex, fn(&regex::Captures<'_>) -> Result<Command>)>,
}

impl CommandParser {
    /// Builds the parser with the two known command grammars.
    #[must_use]
    pub fn new() -> Self {
        let patterns: Vec<(Regex, fn(&regex::Captures<'_>) -> Result<Command>)> = vec![
            (
                Regex::new(r"^(?:add|replace) --from=(\S+) --to=(\S+)$")
                    .expect("add/replace pattern is valid"),
                |captures| {
                    Ok(Command::AddOrReplace {
                        source: sanitize_relative(&captures[1])?,
                        target: sanitize_relative(&captures[2])?,
                    })
                },
            ),
            (
                Regex::new(r"^rm --from=(\S+)$").expect("rm pattern is valid"),
                |captures| {
                    Ok(Command::Remove {
                        target: sanitize_relative(&captures[1])?,
                    })
                },
            ),
        ];

        Self { patterns }
    }

    /// Converts a single descriptor line into a typed [`Command`].
    ///
    /// # Errors
    ///
    /// - [`WarupError::CommandParsing`] carrying the literal line when no
    ///   pattern matches. Fatal to the whole run.
    /// - [`WarupError::UnsafePath`] when a captured path would escape its
    ///   root (see [`sanitize_relative`]).
    pub fn parse(&self, line: &str) -> Result<Command> {
        for (pattern, build) in &self.patterns {
            if let Some(captures) = pattern.captures(line) {
                return build(&captures);
            }
        }

        Err(WarupError::CommandParsing {
            line: line.to_string(),
        })
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}
