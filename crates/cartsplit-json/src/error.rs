//! # Snapshot Error Types
//!
//! Error types for reading and writing snapshot files.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SnapshotError (this module) ← Adds path and entity context            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in app) ← Picks the exit code                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ErrorReport written to the error file                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Snapshot read/write errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A file could not be opened, created, read or flushed.
    #[error("Cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input is not valid JSON or does not have the snapshot shape.
    ///
    /// ## When This Occurs
    /// - Truncated or hand-edited file
    /// - A number where a string is expected (e.g. `"cost": "3.25"`)
    /// - A required field (`name`, `item_name`, `cost`, `total`) is missing
    #[error("Malformed snapshot: {0}")]
    Parse(#[source] serde_json::Error),

    /// Output could not be encoded or written.
    #[error("Cannot write snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// One of the two top-level sections is absent.
    #[error("Snapshot is missing the \"{section}\" section")]
    MissingSection { section: &'static str },

    /// Two roommates or two line items share an id.
    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: &'static str, id: u32 },

    /// An entity needs a generated id but every id above the highest one in
    /// use is taken.
    #[error("No {entity} id left to assign")]
    IdsExhausted { entity: &'static str },
}

impl SnapshotError {
    /// Creates an Io error for a given path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SnapshotError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the file itself could not be reached, as opposed to having
    /// bad contents.
    pub fn is_io(&self) -> bool {
        match self {
            SnapshotError::Io { .. } => true,
            SnapshotError::Parse(err) | SnapshotError::Encode(err) => err.is_io(),
            _ => false,
        }
    }
}

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
