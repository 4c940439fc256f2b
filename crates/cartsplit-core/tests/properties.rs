use cartsplit_core::{
    calculate_shares_with, validate, Amount, Cart, LineItem, Roommate, Roommates, Tolerance,
};
use proptest::prelude::*;

/// Generated carts accumulate more rounding than machine epsilon allows, so
/// reconciliation here runs with a relative tolerance of 1e-9.
const GENERATED_TOLERANCE: Tolerance = Tolerance::Relative(1e-9);

fn build(member_count: usize, items: &[(u32, u8)], tax_cents: u32) -> (Cart, Roommates) {
    let roommates: Roommates = (0..member_count as u32)
        .map(|id| Roommate::new(id, format!("rm{}", id)))
        .collect();

    let mut cart = Cart::default();
    for (id, &(cents, mask)) in items.iter().enumerate() {
        let mut splitters: Vec<u32> = (0..member_count as u32)
            .filter(|bit| mask & (1 << bit) != 0)
            .collect();
        if splitters.is_empty() {
            splitters.push(0);
        }
        cart.add_line_item(LineItem::new(
            id as u32,
            format!("item{}", id),
            Amount::new(f64::from(cents) / 100.0),
            splitters,
        ));
    }

    let tax = Amount::new(f64::from(tax_cents) / 100.0);
    cart.set_tax(tax);
    cart.set_total(cart.items_subtotal() + tax);
    (cart, roommates)
}

proptest! {
    #[test]
    fn totals_are_conserved(
        member_count in 1usize..=6,
        items in prop::collection::vec((1u32..=5_000, 0u8..=63), 1..=12),
        tax_cents in 0u32..=500,
    ) {
        let (mut cart, mut roommates) = build(member_count, &items, tax_cents);
        validate(&cart, &roommates).unwrap();
        calculate_shares_with(&mut cart, &mut roommates, GENERATED_TOLERANCE).unwrap();

        prop_assert!(Tolerance::CURRENCY.matches(roommates.total(), cart.total()));
    }

    #[test]
    fn tax_follows_pre_tax_spend(
        member_count in 1usize..=6,
        items in prop::collection::vec((1u32..=5_000, 0u8..=63), 1..=12),
        tax_cents in 1u32..=500,
    ) {
        let (mut cart, mut roommates) = build(member_count, &items, tax_cents);
        calculate_shares_with(&mut cart, &mut roommates, GENERATED_TOLERANCE).unwrap();

        let pre_tax_total = cart.pre_tax_total();
        for roommate in &roommates {
            let spent = roommate.total() - roommate.tax_share();
            let expected_fraction = spent.ratio_of(pre_tax_total);
            let actual_fraction = roommate.tax_share().ratio_of(cart.tax());
            prop_assert!((expected_fraction - actual_fraction).abs() < 1e-9);
        }
    }

    #[test]
    fn every_splitter_records_the_item(
        member_count in 1usize..=6,
        items in prop::collection::vec((1u32..=5_000, 0u8..=63), 1..=12),
    ) {
        let (mut cart, mut roommates) = build(member_count, &items, 0);
        calculate_shares_with(&mut cart, &mut roommates, GENERATED_TOLERANCE).unwrap();

        for item in cart.line_items() {
            for splitter in item.splitters() {
                let roommate = roommates.get(*splitter).unwrap();
                prop_assert!(roommate.items().contains(&item.id()));
            }
        }
    }
}
