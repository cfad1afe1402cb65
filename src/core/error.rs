//! Error handling for warup
//!
//! The error system is built around two types:
//! - [`WarupError`] - strongly-typed failure families for everything that can
//!   go wrong while applying an update archive
//! - [`ErrorContext`] - wrapper that adds user-friendly details and
//!   suggestions for CLI display
//!
//! Every failure is fatal to the current apply run. Nothing is retried
//! internally; the caller decides whether to start a fresh run. The original
//! target directory is guaranteed untouched for any failure raised before the
//! swap phase.
//!
//! Use [`user_friendly_error`] at the CLI boundary to convert any error into
//! a displayable context with actionable suggestions.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for warup operations.
///
/// Each variant identifies the phase of the apply run that failed and wraps
/// the underlying cause where one exists. See the crate-level documentation
/// for the phase ordering.
#[derive(Error, Debug)]
pub enum WarupError {
    /// Target directory missing, not a directory, or not writable.
    ///
    /// Raised during validation, before any staging or extraction, so no
    /// temporary state exists when this error surfaces.
    #[error("Cannot apply update to target directory {path}: {reason}")]
    TargetDirectoryPermission {
        /// The target directory that failed validation
        path: String,
        /// The missing capability (not found, not a directory, not writable)
        reason: String,
    },

    /// Copying a directory tree to or from the staging area failed.
    #[error("Failed to copy {from} to {to}")]
    TemporaryCopy {
        /// Root of the tree being copied
        from: String,
        /// Destination root
        to: String,
        /// The I/O failure that aborted the copy
        #[source]
        source: std::io::Error,
    },

    /// Recursive removal failed on a specific path.
    ///
    /// Removal is fail-fast: siblings of the offending path are left in
    /// place once this error is raised.
    #[error("Could not delete {path}")]
    PathDeletion {
        /// The path that could not be deleted
        path: String,
        /// The I/O failure reported for that path
        #[source]
        source: std::io::Error,
    },

    /// The update archive could not be opened or an entry could not be
    /// extracted.
    #[error("Failed to unpack update archive {archive}")]
    UpdateUnzip {
        /// Path of the archive being extracted
        archive: String,
        /// The zip or I/O failure that aborted extraction
        #[source]
        source: zip::result::ZipError,
    },

    /// The extracted archive has no top-level `batch.warup`, or the
    /// descriptor could not be opened for reading.
    #[error("No update descriptor: {reason}")]
    NoUpdateDescriptor {
        /// Why the descriptor is unusable
        reason: String,
    },

    /// A manifest line matched no known command pattern.
    ///
    /// Fatal to the whole run; no later lines are executed.
    #[error("Line could not be parsed: {line}")]
    CommandParsing {
        /// The literal offending line
        line: String,
    },

    /// A manifest path would escape its root after resolution.
    ///
    /// Manifest paths are always interpreted relative to the extraction or
    /// staging root; `..` components and absolute paths are rejected.
    #[error("Unsafe path in update descriptor: {path}")]
    UnsafePath {
        /// The offending path as written in the manifest
        path: String,
    },

    /// Any other I/O failure surfaced during the run (manifest reading,
    /// temporary directory creation).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T, E = WarupError> = std::result::Result<T, E>;

/// Error context wrapper that provides user-friendly error information.
///
/// Wraps a [`WarupError`] and adds an optional suggestion and details line.
/// This is the shape the CLI prints on failure:
///
/// 1. **Error**: the main message, red and bold
/// 2. **Details**: additional context, yellow (optional)
/// 3. **Suggestion**: actionable resolution steps, green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying warup error
    pub error: WarupError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: WarupError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining why the error occurred, displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Typed [`WarupError`]s get tailored suggestions per failure family; plain
/// I/O errors get generic filesystem guidance; anything else is displayed
/// with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<WarupError>() {
        Ok(warup_error) => return create_error_context(warup_error),
        Err(other) => other,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>()
        && io_error.kind() == std::io::ErrorKind::PermissionDenied
    {
        return ErrorContext::new(WarupError::TargetDirectoryPermission {
            path: "unknown".to_string(),
            reason: "permission denied".to_string(),
        })
        .with_suggestion("Check file ownership or re-run with sufficient permissions")
        .with_details(
            "warup needs read and write access to the target directory and its temporary copies",
        );
    }

    // Generic error - include the full cause chain for diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(WarupError::Io(std::io::Error::other(message)))
}

/// Map each [`WarupError`] variant to a context with tailored suggestions.
fn create_error_context(error: WarupError) -> ErrorContext {
    match &error {
        WarupError::TargetDirectoryPermission { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Check that the target directory exists and that you have write access to it",
            )
            .with_details(
                "The target is validated before anything else; nothing has been modified",
            ),
        WarupError::TemporaryCopy { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Check free disk space and permissions on the target's parent directory",
            )
            .with_details(
                "Updates are applied to a temporary copy first; the copy failed and the \
                 original target was not modified",
            ),
        WarupError::PathDeletion { .. } => ErrorContext::new(error)
            .with_suggestion("Check that no other process holds the named path open"),
        WarupError::UpdateUnzip { .. } => ErrorContext::new(error)
            .with_suggestion("Verify the archive is a complete, uncorrupted zip file")
            .with_details(
                "The archive could not be opened or one of its entries failed to extract",
            ),
        WarupError::NoUpdateDescriptor { .. } => ErrorContext::new(error)
            .with_suggestion("Ensure the archive contains a top-level batch.warup file")
            .with_details("Every update archive must describe its operations in batch.warup"),
        WarupError::CommandParsing { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Valid forms: 'add --from=<src> --to=<dst>', 'replace --from=<src> --to=<dst>', \
                 'rm --from=<path>'",
            )
            .with_details("The run was aborted; no command after the offending line was executed"),
        WarupError::UnsafePath { .. } => ErrorContext::new(error).with_details(
            "Descriptor paths are relative to the archive and target roots; '..' segments \
             and absolute paths are rejected",
        ),
        WarupError::Io(_) => {
            ErrorContext::new(error).with_suggestion("Check filesystem permissions and free disk space")
        }
    }
}
