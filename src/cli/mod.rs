//! cli
//!
//! Command-line interface layer for gh-hydrate.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the diagnostic log subscriber
//! - Delegate to command handlers
//! - Does NOT call GitHub directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`] for execution.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::engine;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    // Create context from CLI flags. Commands set dry_run themselves.
    let ctx = engine::Context {
        debug: cli.debug,
        quiet: cli.quiet,
        ..Default::default()
    };

    // Dispatch to command handler
    commands::dispatch(cli.command, &ctx)
}

/// Log to stderr. `RUST_LOG` wins; otherwise `--debug` enables this crate's debug events.
fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("gh_hydrate=debug,warn")
        } else {
            EnvFilter::new("warn")
        }
    });

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
