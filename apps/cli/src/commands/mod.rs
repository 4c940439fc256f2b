//! Subcommand implementations.
//!
//! Each command takes resolved [`Settings`] and a writer for its normal
//! output, so tests can run it against a buffer instead of stdout.

pub mod check;
pub mod split;

use std::io::Write;
use std::path::Path;

use cartsplit_json::save_error_report;
use tracing::warn;

use crate::cli::Commands;
use crate::config::Settings;
use crate::error::CliResult;
use crate::CliError;

/// Dispatches a parsed subcommand.
pub fn execute<W: Write>(command: &Commands, settings: Settings, out: &mut W) -> CliResult<()> {
    match command {
        Commands::Split(args) => split::execute(args, settings, out),
        Commands::Check(args) => check::execute(args, settings, out),
    }
}

/// Writes the error report for `err` if a destination was configured.
///
/// A failure here is logged and otherwise ignored so that the triggering
/// error is the one reported.
pub fn report_failure(err: &CliError, error_output: Option<&Path>) {
    let Some(path) = error_output else {
        return;
    };

    if let Err(write_err) = save_error_report(path, &err.report()) {
        warn!(
            path = %path.display(),
            error = %write_err,
            "Could not write error report"
        );
    }
}
