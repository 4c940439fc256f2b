//! `cartsplit check`: load and validate only.

use std::io::Write;

use cartsplit_core::validate_with;
use cartsplit_json::load_snapshot;
use tracing::info;

use super::report_failure;
use crate::cli::CheckArgs;
use crate::config::{Overrides, Settings};
use crate::error::{CliError, CliResult};

/// Validates the input and prints `OK` when it would split cleanly.
pub fn execute<W: Write>(args: &CheckArgs, settings: Settings, out: &mut W) -> CliResult<()> {
    let settings = settings.apply(Overrides::from(args))?;

    let result = check(args, &settings, out);
    if let Err(err) = &result {
        report_failure(err, settings.error_output.as_deref());
    }
    result
}

fn check<W: Write>(args: &CheckArgs, settings: &Settings, out: &mut W) -> CliResult<()> {
    let snapshot = load_snapshot(&args.input)?;
    validate_with(&snapshot.cart, &snapshot.roommates, settings.tolerance())?;

    info!(
        input = %args.input.display(),
        line_items = snapshot.cart.item_count(),
        roommates = snapshot.roommates.len(),
        "Cart is valid"
    );
    writeln!(out, "OK").map_err(CliError::Stdout)
}
