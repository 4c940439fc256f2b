//! # cartsplit-core: Pure Allocation Logic for cartsplit
//!
//! This crate is the **heart** of cartsplit. It splits a shared shopping
//! cart (line items plus tax) among a group of roommates and produces an
//! itemized total per person. Everything here is a pure function over
//! in-memory data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        cartsplit Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (`cartsplit split`)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 cartsplit-json (snapshot files)                 │   │
//! │  │        load → Cart + Roommates        save ← Cart + Roommates   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ cartsplit-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation │  │ allocation│  │   │
//! │  │   │   Cart    │  │  Amount   │  │  validate  │  │ calculate │  │   │
//! │  │   │ LineItem  │  │ Tolerance │  │            │  │  _shares  │  │   │
//! │  │   │ Roommate  │  │           │  │            │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Data model (Cart, LineItem, Roommate, Roommates)
//! - [`money`] - `Amount` and relative tolerance comparison
//! - [`error`] - Split error taxonomy
//! - [`validation`] - Input validation before allocation
//! - [`allocation`] - Share and tax allocation engine
//!
//! ## Example Usage
//!
//! ```rust
//! use cartsplit_core::{calculate_shares, validate, Amount, Cart, LineItem, Roommate, Roommates};
//!
//! let mut roommates: Roommates = [Roommate::new(0, "David"), Roommate::new(1, "Erica")]
//!     .into_iter()
//!     .collect();
//!
//! let mut cart = Cart::new(Amount::new(11.0), Amount::new(1.0));
//! cart.add_line_item(LineItem::new(0, "pizza", Amount::new(10.0), [0, 1]));
//!
//! validate(&cart, &roommates).unwrap();
//! calculate_shares(&mut cart, &mut roommates).unwrap();
//!
//! assert_eq!(roommates.get(0).unwrap().total().value(), 5.5);
//! assert_eq!(roommates.get(1).unwrap().tax_share().value(), 0.5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cartsplit_core::Cart` instead of
// `use cartsplit_core::types::Cart`

pub use allocation::{calculate_shares, calculate_shares_with, Reconciliation};
pub use error::{ErrorKind, InvalidInput, SplitError, SplitResult};
pub use money::{approximately_equal, Amount, Tolerance};
pub use types::*;
pub use validation::{validate, validate_with};
