//! Command-line interface for warup
//!
//! The surface is deliberately tiny: exactly two positional arguments, the
//! update archive and the target directory. Any other argument count is a
//! usage error produced by the parser. There are no flags and no persisted
//! configuration; log verbosity comes from the standard `RUST_LOG`
//! environment filter.
//!
//! ```bash
//! warup ./update-1.4.zip /opt/app
//! ```

use crate::applier::PatchApplier;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Main CLI structure for warup.
///
/// Applies a packaged update archive to a directory tree. The run either
/// fully applies or leaves the target untouched and exits nonzero.
#[derive(Parser)]
#[command(
    name = "warup",
    about = "Apply a warup update archive to a directory",
    version,
    long_about = "Applies a zip-packaged warup update (a batch.warup descriptor plus payload \
                  files) to a target directory. The update either fully applies or the target \
                  is left untouched."
)]
pub struct Cli {
    /// Path to the update archive (zip)
    archive: PathBuf,

    /// Directory the update is applied to
    target: PathBuf,
}

impl Cli {
    /// Runs the apply and reports the updated directory on stdout.
    pub fn execute(self) -> Result<()> {
        let applier = PatchApplier::new();
        let applied = applier.apply(&self.archive, &self.target)?;
        println!("Updated {}", applied.display());
        Ok(())
    }
}
