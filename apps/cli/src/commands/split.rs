//! `cartsplit split`: load, validate, allocate, print, save.

use std::io::Write;
use std::path::Path;

use cartsplit_core::{calculate_shares_with, validate_with, Cart, Roommates};
use cartsplit_json::{load_snapshot, save_snapshot, Snapshot};
use tracing::info;

use super::report_failure;
use crate::cli::SplitArgs;
use crate::config::{Overrides, Settings};
use crate::error::{CliError, CliResult};

/// Runs the split and writes an error report if it fails.
pub fn execute<W: Write>(args: &SplitArgs, settings: Settings, out: &mut W) -> CliResult<()> {
    let settings = match settings.apply(Overrides::from(args)) {
        Ok(settings) => settings,
        Err(err) => {
            let err = CliError::from(err);
            report_failure(&err, args.error_output.as_deref());
            return Err(err);
        }
    };

    let result = split(&args.input, &settings, out);
    if let Err(err) = &result {
        report_failure(err, settings.error_output.as_deref());
    }
    result
}

fn split<W: Write>(input: &Path, settings: &Settings, out: &mut W) -> CliResult<()> {
    let Snapshot {
        mut cart,
        mut roommates,
    } = load_snapshot(input)?;

    let tolerance = settings.tolerance();
    validate_with(&cart, &roommates, tolerance)?;
    let reconciliation = calculate_shares_with(&mut cart, &mut roommates, tolerance)?;

    info!(
        input = %input.display(),
        total = reconciliation.expected.value(),
        distributed = reconciliation.distributed.value(),
        "Cart split"
    );

    if settings.print {
        print_split(out, &cart, &roommates).map_err(CliError::Stdout)?;
    }

    if let Some(path) = &settings.output {
        save_snapshot(path, &cart, &roommates)?;
        info!(path = %path.display(), "Wrote split snapshot");
    }

    Ok(())
}

/// Roommates first, then the cart.
fn print_split<W: Write>(out: &mut W, cart: &Cart, roommates: &Roommates) -> std::io::Result<()> {
    for roommate in roommates {
        writeln!(out, "{}", roommate)?;
    }
    writeln!(out, "{}", cart)?;
    out.flush()
}
