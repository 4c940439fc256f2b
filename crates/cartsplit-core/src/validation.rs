//! # Validation Module
//!
//! Rejects a cart/roommate pair that cannot be meaningfully split, before any
//! allocation work is attempted.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      validate(cart, roommates)                          │
//! │                                                                         │
//! │  1. cart has no line items ─────────────► InvalidInput::NoLineItems    │
//! │  2. total <= 0 ─────────────────────────► InvalidInput::NonPositiveTotal│
//! │  3. tax < 0 ────────────────────────────► InvalidInput::NegativeTax    │
//! │  4. any item cost < 0 (first by id) ────► InvalidInput::NegativeItemCost│
//! │  5. sum(costs) + tax ≉ total ───────────► InvalidInput::TotalMismatch  │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  6. item with no splitters ─────────────► SplitError::EmptySplitterSet │
//! │  7. splitter id not a roommate ─────────► SplitError::UnknownRoommate  │
//! │  8. roommate already allocated ─────────► RoommateAlreadyAllocated     │
//! │  9. tax > 0, total - tax <= 0 ──────────► InvalidInput::TaxWithoutSpend│
//! │                                                                         │
//! │  First failure wins. Checks 6-9 are the same guards the engine applies, │
//! │  so a cart that validates also allocates.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartsplit_core::{validate, Amount, Cart, ErrorKind, Roommates};
//!
//! let cart = Cart::new(Amount::new(10.0), Amount::zero());
//! let err = validate(&cart, &Roommates::new()).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidInput);
//! ```

use crate::error::{InvalidInput, SplitError, SplitResult};
use crate::money::{Amount, Tolerance};
use crate::types::{Cart, Roommates};

/// Validates with the default machine-epsilon tolerance.
pub fn validate(cart: &Cart, roommates: &Roommates) -> SplitResult<()> {
    validate_with(cart, roommates, Tolerance::default())
}

/// Validates with a caller-chosen tolerance for the total check.
pub fn validate_with(cart: &Cart, roommates: &Roommates, tolerance: Tolerance) -> SplitResult<()> {
    if cart.is_empty() {
        return Err(InvalidInput::NoLineItems.into());
    }

    if !cart.total().is_positive() {
        return Err(InvalidInput::NonPositiveTotal {
            total: cart.total(),
        }
        .into());
    }

    if cart.tax().is_negative() {
        return Err(InvalidInput::NegativeTax { tax: cart.tax() }.into());
    }

    let mut subtotal = Amount::zero();
    for item in cart.line_items() {
        if item.cost().is_negative() {
            return Err(InvalidInput::NegativeItemCost {
                item_id: item.id(),
                cost: item.cost(),
            }
            .into());
        }
        subtotal += item.cost();
    }

    let computed = subtotal + cart.tax();
    if !tolerance.matches(computed, cart.total()) {
        return Err(InvalidInput::TotalMismatch {
            expected: cart.total(),
            actual: computed,
        }
        .into());
    }

    for item in cart.line_items() {
        if item.splitter_count() == 0 {
            return Err(SplitError::EmptySplitterSet { item_id: item.id() });
        }
        if let Some(&roommate_id) = item.splitters().iter().find(|id| !roommates.contains(**id)) {
            return Err(SplitError::UnknownRoommate {
                item_id: item.id(),
                roommate_id,
            });
        }
    }

    if let Some(roommate) = roommates.iter().find(|rm| !rm.is_unallocated()) {
        return Err(InvalidInput::RoommateAlreadyAllocated {
            roommate_id: roommate.id(),
        }
        .into());
    }

    if !cart.tax().is_zero() && !cart.pre_tax_total().is_positive() {
        return Err(InvalidInput::TaxWithoutSpend { tax: cart.tax() }.into());
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::{LineItem, Roommate};

    fn roommates(n: u32) -> Roommates {
        (0..n).map(|id| Roommate::new(id, format!("rm{}", id))).collect()
    }

    fn item(id: u32, cost: f64, splitters: &[u32]) -> LineItem {
        LineItem::new(id, format!("item{}", id), Amount::new(cost), splitters.iter().copied())
    }

    fn cart(total: f64, tax: f64, items: Vec<LineItem>) -> Cart {
        let mut cart = Cart::new(Amount::new(total), Amount::new(tax));
        for item in items {
            cart.add_line_item(item);
        }
        cart
    }

    #[test]
    fn test_valid_cart_passes() {
        let c = cart(5.5, 0.5, vec![item(0, 2.0, &[0]), item(1, 3.0, &[0, 1])]);
        assert!(validate(&c, &roommates(2)).is_ok());
    }

    #[test]
    fn test_rejects_empty_cart() {
        let c = cart(1.0, 0.0, vec![]);
        assert_eq!(
            validate(&c, &roommates(1)),
            Err(SplitError::InvalidInput(InvalidInput::NoLineItems))
        );
    }

    #[test]
    fn test_rejects_non_positive_total() {
        let c = cart(0.0, 0.0, vec![item(0, 0.0, &[0])]);
        assert!(matches!(
            validate(&c, &roommates(1)),
            Err(SplitError::InvalidInput(InvalidInput::NonPositiveTotal { .. }))
        ));

        let c = cart(-1.0, 0.0, vec![item(0, 1.0, &[0])]);
        assert!(matches!(
            validate(&c, &roommates(1)),
            Err(SplitError::InvalidInput(InvalidInput::NonPositiveTotal { .. }))
        ));
    }

    #[test]
    fn test_rejects_negative_tax() {
        let c = cart(1.0, -0.5, vec![item(0, 1.5, &[0])]);
        assert!(matches!(
            validate(&c, &roommates(1)),
            Err(SplitError::InvalidInput(InvalidInput::NegativeTax { .. }))
        ));
    }

    #[test]
    fn test_negative_cost_names_item() {
        let c = cart(1.0, 0.0, vec![item(0, 2.0, &[0]), item(7, -1.0, &[0])]);
        assert_eq!(
            validate(&c, &roommates(1)),
            Err(SplitError::InvalidInput(InvalidInput::NegativeItemCost {
                item_id: 7,
                cost: Amount::new(-1.0),
            }))
        );
    }

    #[test]
    fn test_rejects_total_mismatch() {
        let c = cart(10.0, 1.0, vec![item(0, 8.0, &[0])]);
        let err = validate(&c, &roommates(1)).unwrap_err();
        match err {
            SplitError::InvalidInput(InvalidInput::TotalMismatch { expected, actual }) => {
                assert_eq!(expected.value(), 10.0);
                assert_eq!(actual.value(), 9.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_first_failure_wins() {
        // Negative tax and a mismatched total: tax is checked first
        let c = cart(10.0, -1.0, vec![item(0, 1.0, &[0])]);
        assert!(matches!(
            validate(&c, &roommates(1)),
            Err(SplitError::InvalidInput(InvalidInput::NegativeTax { .. }))
        ));

        // Negative cost and an empty splitter set: cost is checked first
        let c = cart(1.0, 0.0, vec![item(0, 2.0, &[]), item(1, -1.0, &[0])]);
        assert!(matches!(
            validate(&c, &roommates(1)),
            Err(SplitError::InvalidInput(InvalidInput::NegativeItemCost { item_id: 1, .. }))
        ));
    }

    #[test]
    fn test_rejects_empty_splitter_set() {
        let c = cart(3.0, 0.0, vec![item(0, 1.0, &[0]), item(1, 2.0, &[])]);
        let err = validate(&c, &roommates(1)).unwrap_err();
        assert_eq!(err, SplitError::EmptySplitterSet { item_id: 1 });
        assert_eq!(err.kind(), ErrorKind::EmptySplitterSet);
    }

    #[test]
    fn test_rejects_unknown_roommate() {
        let c = cart(3.0, 0.0, vec![item(0, 3.0, &[0, 5])]);
        assert_eq!(
            validate(&c, &roommates(2)),
            Err(SplitError::UnknownRoommate {
                item_id: 0,
                roommate_id: 5
            })
        );
    }

    #[test]
    fn test_rejects_tax_without_spend() {
        let c = cart(1.0, 1.0, vec![item(0, 0.0, &[0])]);
        assert!(matches!(
            validate(&c, &roommates(1)),
            Err(SplitError::InvalidInput(InvalidInput::TaxWithoutSpend { .. }))
        ));
    }

    #[test]
    fn test_tax_without_spend_uses_pre_tax_total() {
        // The tiny cost vanishes from the sum, leaving total - tax at zero
        let c = cart(1.0, 1.0, vec![item(0, 1e-20, &[0])]);
        assert!(matches!(
            validate(&c, &roommates(1)),
            Err(SplitError::InvalidInput(InvalidInput::TaxWithoutSpend { .. }))
        ));

        let mut rms = roommates(1);
        let mut allocated = c.clone();
        assert_eq!(
            crate::calculate_shares(&mut allocated, &mut rms).unwrap_err(),
            validate(&c, &roommates(1)).unwrap_err()
        );
    }

    #[test]
    fn test_rejects_roommate_with_prior_allocation() {
        let c = cart(3.0, 0.0, vec![item(0, 3.0, &[0, 1])]);
        let mut rms = roommates(2);
        rms.get_mut(1).unwrap().add_to_total(Amount::new(1.5));

        assert_eq!(
            validate(&c, &rms),
            Err(SplitError::InvalidInput(InvalidInput::RoommateAlreadyAllocated {
                roommate_id: 1
            }))
        );
    }

    #[test]
    fn test_free_items_without_tax_are_fine() {
        let c = cart(2.0, 0.0, vec![item(0, 0.0, &[0]), item(1, 2.0, &[1])]);
        assert!(validate(&c, &roommates(2)).is_ok());
    }

    #[test]
    fn test_looser_tolerance_accepts_rounded_total() {
        let c = cart(10.001, 0.0, vec![item(0, 10.0, &[0])]);
        assert!(validate(&c, &roommates(1)).is_err());
        assert!(validate_with(&c, &roommates(1), Tolerance::relative(1e-3)).is_ok());
    }
}
