//! # Allocation Engine
//!
//! Computes what each roommate owes for a validated cart.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    calculate_shares(cart, roommates)                    │
//! │                                                                         │
//! │  0. Every roommate must start with no total, tax share or items         │
//! │                                                                         │
//! │  1. For each line item (ascending id):                                  │
//! │       share_cost = cost ÷ |splitters|                                   │
//! │       for each splitter: record item id, total += share_cost            │
//! │                                                                         │
//! │  2. pre_tax_total = cart.total - cart.tax                               │
//! │                                                                         │
//! │  3. For each roommate (ascending id):                                   │
//! │       tax_share = (total ÷ pre_tax_total) × cart.tax                    │
//! │       set tax_share, total += tax_share                                 │
//! │                                                                         │
//! │  4. Reconcile: Σ shares + Σ tax shares ≈ cart.total                     │
//! │                                                                         │
//! │  Tax is apportioned by pre-tax spend, NOT evenly: someone who bought   │
//! │  70% of the groceries pays 70% of the tax.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! The work happens on scratch copies of the cart and roommates. They are
//! committed back only when reconciliation passes, so a failed call leaves
//! the caller's data exactly as it was.

use tracing::debug;

use crate::error::{InvalidInput, SplitError, SplitResult};
use crate::money::{Amount, Tolerance};
use crate::types::{Cart, Roommates};

/// Outcome of the post-allocation integrity check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconciliation {
    /// Declared cart total.
    pub expected: Amount,
    /// Every share cost handed out plus every tax share.
    pub distributed: Amount,
    /// `cart.total - cart.tax`, the base for tax proportions.
    pub pre_tax_total: Amount,
}

/// Allocates shares using the default machine-epsilon reconciliation.
///
/// ## Example
/// ```rust
/// use cartsplit_core::{calculate_shares, Amount, Cart, LineItem, Roommate, Roommates};
///
/// let mut roommates: Roommates = [Roommate::new(0, "A"), Roommate::new(1, "B")].into_iter().collect();
/// let mut cart = Cart::new(Amount::new(21.0), Amount::new(1.0));
/// cart.add_line_item(LineItem::new(0, "rice", Amount::new(5.0), [0]));
/// cart.add_line_item(LineItem::new(1, "oil", Amount::new(15.0), [1]));
///
/// let rec = calculate_shares(&mut cart, &mut roommates).unwrap();
/// assert_eq!(rec.pre_tax_total.value(), 20.0);
/// assert_eq!(roommates.get(0).unwrap().tax_share().value(), 0.25);
/// assert_eq!(roommates.get(1).unwrap().total().value(), 15.75);
/// ```
pub fn calculate_shares(cart: &mut Cart, roommates: &mut Roommates) -> SplitResult<Reconciliation> {
    calculate_shares_with(cart, roommates, Tolerance::default())
}

/// Allocates shares, reconciling with a caller-chosen tolerance.
///
/// On error neither `cart` nor `roommates` is modified.
pub fn calculate_shares_with(
    cart: &mut Cart,
    roommates: &mut Roommates,
    tolerance: Tolerance,
) -> SplitResult<Reconciliation> {
    let mut scratch_cart = cart.clone();
    let mut scratch_roommates = roommates.clone();

    let reconciliation = allocate(&mut scratch_cart, &mut scratch_roommates, tolerance)?;

    *cart = scratch_cart;
    *roommates = scratch_roommates;
    Ok(reconciliation)
}

fn allocate(
    cart: &mut Cart,
    roommates: &mut Roommates,
    tolerance: Tolerance,
) -> SplitResult<Reconciliation> {
    if let Some(roommate) = roommates.iter().find(|rm| !rm.is_unallocated()) {
        return Err(InvalidInput::RoommateAlreadyAllocated {
            roommate_id: roommate.id(),
        }
        .into());
    }

    let mut distributed = Amount::zero();

    // Pre-tax shares
    for item in cart.line_items_mut() {
        let splitter_count = item.splitter_count();
        if splitter_count == 0 {
            return Err(SplitError::EmptySplitterSet { item_id: item.id() });
        }

        let share_cost = item.cost() / splitter_count;
        item.set_share_cost(share_cost);

        for &roommate_id in item.splitters() {
            let roommate = roommates
                .get_mut(roommate_id)
                .ok_or(SplitError::UnknownRoommate {
                    item_id: item.id(),
                    roommate_id,
                })?;
            roommate.add_line_item(item.id());
            roommate.add_to_total(share_cost);
            distributed += share_cost;
        }

        debug!(
            item_id = item.id(),
            splitters = splitter_count,
            share_cost = share_cost.value(),
            "Allocated line item"
        );
    }

    // Tax shares
    let tax = cart.tax();
    let pre_tax_total = cart.pre_tax_total();
    if !pre_tax_total.is_positive() && !tax.is_zero() {
        return Err(InvalidInput::TaxWithoutSpend { tax }.into());
    }

    for roommate in roommates.iter_mut() {
        let tax_share = if tax.is_zero() {
            Amount::zero()
        } else {
            tax * roommate.total().ratio_of(pre_tax_total)
        };
        roommate.set_tax_share(tax_share);
        roommate.add_to_total(tax_share);
        distributed += tax_share;

        debug!(
            roommate_id = roommate.id(),
            tax_share = tax_share.value(),
            total = roommate.total().value(),
            "Allocated tax share"
        );
    }

    let expected = cart.total();
    if !tolerance.matches(distributed, expected) {
        return Err(SplitError::Reconciliation {
            expected,
            actual: distributed,
        });
    }

    debug!(
        expected = expected.value(),
        distributed = distributed.value(),
        "Cart reconciled"
    );

    Ok(Reconciliation {
        expected,
        distributed,
        pre_tax_total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
