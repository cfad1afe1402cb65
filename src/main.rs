//! warup CLI entry point
//!
//! Parses the two positional arguments (archive, target directory), runs the
//! apply, and renders failures as user-friendly errors with suggestions.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use warup::cli;
use warup::core::user_friendly_error;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = cli::Cli::parse();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
