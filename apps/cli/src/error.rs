//! CLI-level errors (wraps engine, snapshot and settings errors)

use std::io;

use cartsplit_core::SplitError;
use cartsplit_json::{ErrorCode, ErrorReport, SnapshotError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::exitcode;

/// Top-level error type. These are what get shown to the user.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Printing the result to stdout failed.
    #[error("Cannot write to stdout: {0}")]
    Stdout(#[source] io::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Split(e) if e.is_input_error() => exitcode::DATAERR,
            CliError::Split(_) => exitcode::SOFTWARE,
            CliError::Snapshot(e) => match e {
                SnapshotError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                    exitcode::NOINPUT
                }
                SnapshotError::Io { .. } => exitcode::IOERR,
                SnapshotError::Encode(_) if e.is_io() => exitcode::IOERR,
                SnapshotError::Encode(_) => exitcode::SOFTWARE,
                SnapshotError::Parse(_)
                | SnapshotError::MissingSection { .. }
                | SnapshotError::DuplicateId { .. }
                | SnapshotError::IdsExhausted { .. } => exitcode::DATAERR,
            },
            CliError::Config(_) => exitcode::CONFIG,
            CliError::Stdout(_) => exitcode::IOERR,
        }
    }

    /// Structured payload for the error file.
    pub fn report(&self) -> ErrorReport {
        match self {
            CliError::Split(e) => ErrorReport::from(e),
            CliError::Snapshot(e) => ErrorReport::from(e),
            CliError::Config(e) => ErrorReport::new(ErrorCode::Config, e.to_string()),
            CliError::Stdout(_) => ErrorReport::new(ErrorCode::Io, self.to_string()),
        }
    }
}
