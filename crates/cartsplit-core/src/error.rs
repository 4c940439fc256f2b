//! # Error Types
//!
//! Domain-specific error types for cartsplit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cartsplit-core errors (this file)                                     │
//! │  ├── SplitError        - Everything validate/calculate can raise       │
//! │  │   ├── InvalidInput      - Bad cart data (caller fixes and retries)  │
//! │  │   ├── UnknownRoommate   - Splitter id with no roommate              │
//! │  │   ├── EmptySplitterSet  - Line item nobody is splitting             │
//! │  │   └── Reconciliation    - Internal integrity check failed           │
//! │  └── InvalidInput      - Structural / arithmetic preconditions         │
//! │                                                                         │
//! │  cartsplit-json errors (separate crate)                                │
//! │  └── SnapshotError     - File and format failures                      │
//! │                                                                         │
//! │  Flow: InvalidInput → SplitError → CliError → ErrorReport (JSON)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, expected vs actual)
//! 3. Errors are enum variants, never String
//! 4. Every variant maps to a machine-readable [`ErrorKind`]

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Amount;
use crate::types::{ItemId, RoommateId};

// =============================================================================
// Split Error
// =============================================================================

/// Errors raised by [`validate`](crate::validate) and
/// [`calculate_shares`](crate::calculate_shares).
///
/// Every variant aborts the current call immediately. No partial results are
/// returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    /// The cart fails a structural or arithmetic precondition.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// A line item names a splitter that is not in the roommate collection.
    ///
    /// ## When This Occurs
    /// - A roommate was removed from the input but still appears in `splitting`
    /// - A typo in a hand-edited snapshot
    #[error("Line item {item_id} is split by unknown roommate {roommate_id}")]
    UnknownRoommate {
        item_id: ItemId,
        roommate_id: RoommateId,
    },

    /// A line item has nobody splitting it, so its share cost is undefined.
    #[error("Line item {item_id} has no roommates splitting it")]
    EmptySplitterSet { item_id: ItemId },

    /// The amounts handed out do not add back up to the cart total.
    ///
    /// This is a computation-integrity failure, not a user input error. It
    /// shows up when `calculate_shares` runs on a cart that skipped
    /// validation, or when floating-point rounding exceeds the tolerance.
    #[error("Cart total {expected} does not match roommate split total {actual}")]
    Reconciliation { expected: Amount, actual: Amount },
}

impl SplitError {
    /// Returns the tagged kind for programmatic handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SplitError::InvalidInput(_) => ErrorKind::InvalidInput,
            SplitError::UnknownRoommate { .. } => ErrorKind::UnknownRoommate,
            SplitError::EmptySplitterSet { .. } => ErrorKind::EmptySplitterSet,
            SplitError::Reconciliation { .. } => ErrorKind::Reconciliation,
        }
    }

    /// True when the caller can fix the data and retry.
    ///
    /// Only [`SplitError::Reconciliation`] signals a defect in the engine
    /// itself.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, SplitError::Reconciliation { .. })
    }
}

// =============================================================================
// Invalid Input
// =============================================================================

/// Input validation failures.
///
/// The first five variants are checked in declaration order by
/// [`validate`](crate::validate); only the first failure is reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    /// The cart has no line items at all.
    #[error("Invalid cart items, cart must have at least one line item")]
    NoLineItems,

    /// Cart total is zero or negative.
    #[error("Invalid cart total {total}, must be positive")]
    NonPositiveTotal { total: Amount },

    /// Cart tax is negative.
    #[error("Invalid cart tax {tax}, cannot be negative")]
    NegativeTax { tax: Amount },

    /// A line item has a negative cost.
    #[error("Item cost is negative id:{item_id} ({cost})")]
    NegativeItemCost { item_id: ItemId, cost: Amount },

    /// Sum of item costs plus tax is not the declared cart total.
    #[error("Cart total {expected} doesn't equal sum of all items plus tax {actual}")]
    TotalMismatch { expected: Amount, actual: Amount },

    /// A roommate already carries a total, tax share or item list.
    ///
    /// ## When This Occurs
    /// - The output of an earlier split is fed back in as input
    /// - A hand-edited snapshot fills in `total` or `items`
    #[error("Roommate {roommate_id} already has allocated amounts or items")]
    RoommateAlreadyAllocated { roommate_id: RoommateId },

    /// Tax is charged but the pre-tax total (`total - tax`) is not positive,
    /// so there is no spend to apportion it by.
    #[error("Cart tax {tax} cannot be apportioned without any pre-tax spend")]
    TaxWithoutSpend { tax: Amount },
}

// =============================================================================
// Error Kind
// =============================================================================

/// Machine-readable error category.
///
/// ## Serialization
/// ```json
/// { "code": "UNKNOWN_ROOMMATE" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidInput,
    UnknownRoommate,
    EmptySplitterSet,
    Reconciliation,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with SplitError.
pub type SplitResult<T> = Result<T, SplitError>;

// =============================================================================
// Unit Tests
// =============================================================================
