//! CLI module for Lumen.
//!
//! Hosts the controller against a simulated page and exposes the helper
//! commands (contact URI, schema, completions).

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::LumenError;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "LUMEN_LOG";

/// Installs the stderr subscriber.
///
/// `LUMEN_LOG` wins when set; otherwise `--verbose` selects `debug` and the
/// default is `warn`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second install (tests, embedding hosts) is not an error for the CLI.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .try_init();
}

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), LumenError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.execute()
}
