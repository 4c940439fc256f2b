//! # cartsplit-json: Snapshot Files for cartsplit
//!
//! Loads a cart and its roommates from a JSON snapshot, writes them back after
//! allocation, and writes structured error reports when allocation fails.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        cartsplit Data Flow                              │
//! │                                                                         │
//! │  input.json                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 cartsplit-json (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   snapshot    │    │    report     │    │    error     │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ load_snapshot │    │ ErrorReport   │    │ SnapshotError│   │   │
//! │  │   │ save_snapshot │    │ ErrorCode     │    │              │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                          ▲                                      │
//! │       ▼                          │                                      │
//! │  cartsplit-core: validate → calculate_shares                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  output.json   or   error.json  {"error": "...", "code": "..."}       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cartsplit_core::{calculate_shares, validate};
//! use cartsplit_json::{load_snapshot, save_snapshot};
//!
//! let mut snapshot = load_snapshot("groceries.json")?;
//! validate(&snapshot.cart, &snapshot.roommates)?;
//! calculate_shares(&mut snapshot.cart, &mut snapshot.roommates)?;
//! save_snapshot("groceries_split.json", &snapshot.cart, &snapshot.roommates)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod report;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{SnapshotError, SnapshotResult};
pub use report::{save_error_report, write_error_report, ErrorCode, ErrorReport};
pub use snapshot::{load_snapshot, read_snapshot, save_snapshot, write_snapshot, Snapshot};
