//! warup - packaged directory-tree updates, applied all-or-nothing
//!
//! warup applies a declarative update package (a zip archive carrying a
//! `batch.warup` descriptor plus payload files) to an existing directory
//! tree. A run either fully applies or leaves the original target untouched
//! and reports a typed failure - the target is never left half-updated by an
//! interrupted run.
//!
//! # How a run works
//!
//! 1. **Validate** - the target must exist, be a directory, and be writable.
//! 2. **Stage** - the target is recursively copied into a fresh staging
//!    directory next to it.
//! 3. **Extract** - the archive is unpacked into its own temporary
//!    directory; it must contain a top-level `batch.warup`.
//! 4. **Execute** - descriptor commands run in file order against the
//!    staging copy: `add`/`replace` copy payload trees in, `rm` deletes.
//!    The real target is never touched here.
//! 5. **Swap** - only if every command succeeded, the staged tree is renamed
//!    into the target's place (old tree renamed aside first, deleted last).
//!
//! Everything is single-threaded, synchronous, blocking I/O; concurrent runs
//! against the same target must be serialized by the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use warup::applier::PatchApplier;
//! use std::path::Path;
//!
//! # fn example() -> warup::core::Result<()> {
//! let applier = PatchApplier::new();
//!
//! let archive = Path::new("update-1.4.zip");
//! if applier.accepts(archive) {
//!     let updated = applier.apply(archive, Path::new("/opt/app"))?;
//!     println!("updated {}", updated.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`applier`] - the phase orchestrator ([`applier::PatchApplier`])
//! - [`archive`] - zip extraction and the descriptor pre-check
//! - [`manifest`] - descriptor command types and parsing
//! - [`core`] - error taxonomy and CLI-facing error contexts
//! - [`utils`] - recursive tree copy/removal and path hygiene
//! - [`cli`] - the two-argument command-line surface

pub mod applier;
pub mod archive;
pub mod cli;
pub mod core;
pub mod manifest;
pub mod utils;

// Available to both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
