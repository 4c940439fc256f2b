//! # Error Reports
//!
//! The structured payload written when a run fails, so that whatever consumes
//! the output file can branch on `code` instead of matching message text.
//!
//! ```json
//! {
//!   "error": "Line item 3 is split by unknown roommate 7",
//!   "code": "UNKNOWN_ROOMMATE"
//! }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cartsplit_core::{ErrorKind, SplitError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SnapshotError, SnapshotResult};

/// Machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Cart data failed validation
    InvalidInput,

    /// A splitter id has no roommate
    UnknownRoommate,

    /// A line item has no splitters
    EmptySplitterSet,

    /// Allocated amounts did not add back up to the cart total
    Reconciliation,

    /// Snapshot file is malformed
    InvalidSnapshot,

    /// File could not be read or written
    Io,

    /// Settings could not be loaded
    Config,
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidInput => ErrorCode::InvalidInput,
            ErrorKind::UnknownRoommate => ErrorCode::UnknownRoommate,
            ErrorKind::EmptySplitterSet => ErrorCode::EmptySplitterSet,
            ErrorKind::Reconciliation => ErrorCode::Reconciliation,
        }
    }
}

/// What gets written to the error file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Human-readable message
    pub error: String,

    /// Machine-readable category
    pub code: ErrorCode,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ErrorReport {
            error: message.into(),
            code,
        }
    }
}

impl From<&SplitError> for ErrorReport {
    fn from(err: &SplitError) -> Self {
        ErrorReport::new(err.kind().into(), err.to_string())
    }
}

impl From<&SnapshotError> for ErrorReport {
    fn from(err: &SnapshotError) -> Self {
        let code = if err.is_io() {
            ErrorCode::Io
        } else {
            ErrorCode::InvalidSnapshot
        };
        ErrorReport::new(code, err.to_string())
    }
}

/// Writes a report as a single JSON object.
pub fn write_error_report<W: Write>(writer: W, report: &ErrorReport) -> SnapshotResult<()> {
    serde_json::to_writer(writer, report).map_err(SnapshotError::Encode)
}

/// Creates (or truncates) `path` and writes the report to it.
pub fn save_error_report(path: impl AsRef<Path>, report: &ErrorReport) -> SnapshotResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SnapshotError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_error_report(&mut writer, report)?;
    writer.flush().map_err(|e| SnapshotError::io(path, e))?;

    debug!(path = %path.display(), code = ?report.code, "Saved error report");
    Ok(())
}
