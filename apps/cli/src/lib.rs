//! # cartsplit CLI
//!
//! Library half of the `cartsplit` binary. `main.rs` only parses arguments,
//! calls [`run`] and turns the result into an exit code.
//!
//! ## Run Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        cartsplit Run Sequence                           │
//! │                                                                         │
//! │  1. Load Settings ─────────────────────────────────────────────────────►│
//! │     • defaults → cartsplit.toml / --config → CARTSPLIT_* env            │
//! │     • failure: error report (if --error-output), exit 78                │
//! │                                                                         │
//! │  2. Initialize Logging ────────────────────────────────────────────────►│
//! │     • tracing-subscriber with env filter, to stderr                     │
//! │     • RUST_LOG wins, then -v, then log_filter setting                   │
//! │                                                                         │
//! │  3. Run Subcommand ────────────────────────────────────────────────────►│
//! │     • split: load → validate → calculate → print → save                 │
//! │     • check: load → validate → "OK"                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exitcode;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::{Cli, Commands};
pub use config::{ConfigError, Settings};
pub use error::{CliError, CliResult};

use std::io::Write;

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Loads settings, starts logging and runs the parsed subcommand.
///
/// Normal output goes to `out`; logs go to stderr.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref()).map_err(|err| {
        let err = CliError::from(err);
        commands::report_failure(&err, cli.error_output());
        err
    })?;

    init_tracing(&settings.log_filter, cli.verbose);
    debug!(?settings, "Settings loaded");

    commands::execute(&cli.command, settings, out)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages from every crate
/// - `-v` / `-vv` / `-vvv` - Raise the level without touching the environment
/// - otherwise the `log_filter` setting (default `warn,cartsplit=info`)
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(configured: &str, verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_directives(configured, verbosity)))
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn log_directives(configured: &str, verbosity: u8) -> String {
    match verbosity {
        0 => configured.to_string(),
        1 => "info,cartsplit=debug".to_string(),
        2 => "debug,cartsplit=trace".to_string(),
        _ => "trace".to_string(),
    }
}
