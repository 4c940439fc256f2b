//! # Domain Types
//!
//! The in-memory data model for a shared bill and the people splitting it.
//!
//! ## Type Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐            ┌──────────────────────┐          │
//! │  │        Cart          │            │      Roommates       │          │
//! │  │  ──────────────────  │            │  ──────────────────  │          │
//! │  │  total               │            │  id → Roommate       │          │
//! │  │  tax                 │            └──────────┬───────────┘          │
//! │  │  id → LineItem ──────┼──┐                    │                      │
//! │  └──────────────────────┘  │                    ▼                      │
//! │                            ▼         ┌──────────────────────┐          │
//! │            ┌──────────────────────┐  │      Roommate        │          │
//! │            │      LineItem        │  │  ──────────────────  │          │
//! │            │  ──────────────────  │  │  id, name            │          │
//! │            │  id, name, cost      │  │  items (item ids) ◄──┼── calc   │
//! │            │  share_cost  ◄───────┼──┼── calc               │          │
//! │            │  splitters ──────────┼─►│  total, tax_share ◄──┼── calc   │
//! │            └──────────────────────┘  └──────────────────────┘          │
//! │                                                                         │
//! │  splitters are roommate ids (foreign keys, checked by validation)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! All collections are `BTreeMap`/`BTreeSet`, so iteration is always in
//! ascending id order. The allocation engine relies on this to accumulate
//! floating-point sums in a fixed order.

use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::fmt;


use crate::money::Amount;

/// Identifier of a line item, unique within a cart.
pub type ItemId = u32;

/// Identifier of a roommate, unique within a [`Roommates`] collection.
pub type RoommateId = u32;

// =============================================================================
// Line Item
// =============================================================================

/// One priced entry in the cart, split evenly among a set of roommates.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    id: ItemId,
    name: String,
    cost: Amount,
    /// Cost per splitter. Zero until allocation runs.
    share_cost: Amount,
    splitters: BTreeSet<RoommateId>,
}

impl LineItem {
    /// Creates a line item. `share_cost` starts at zero.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        cost: Amount,
        splitters: impl IntoIterator<Item = RoommateId>,
    ) -> Self {
        LineItem {
            id,
            name: name.into(),
            cost,
            share_cost: Amount::zero(),
            splitters: splitters.into_iter().collect(),
        }
    }

    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn cost(&self) -> Amount {
        self.cost
    }

    pub fn set_cost(&mut self, cost: Amount) {
        self.cost = cost;
    }

    #[inline]
    pub fn share_cost(&self) -> Amount {
        self.share_cost
    }

    pub fn set_share_cost(&mut self, share_cost: Amount) {
        self.share_cost = share_cost;
    }

    /// Roommate ids splitting this item, ascending.
    #[inline]
    pub fn splitters(&self) -> &BTreeSet<RoommateId> {
        &self.splitters
    }

    #[inline]
    pub fn splitter_count(&self) -> usize {
        self.splitters.len()
    }

    pub fn add_splitter(&mut self, roommate_id: RoommateId) {
        self.splitters.insert(roommate_id);
    }

    pub fn add_splitters(&mut self, roommate_ids: impl IntoIterator<Item = RoommateId>) {
        self.splitters.extend(roommate_ids);
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id: {} name: {} cost: {} shared cost: {} rms_split: {{",
            self.id, self.name, self.cost, self.share_cost
        )?;
        write_ids(f, &self.splitters)?;
        write!(f, "}}")
    }
}

// =============================================================================
// Roommate
// =============================================================================

/// A participant who owes part of the cart.
///
/// `total` and `tax_share` are zero until allocation runs; `items` is filled
/// in by allocation with every line item the roommate splits.
#[derive(Debug, Clone, PartialEq)]
pub struct Roommate {
    id: RoommateId,
    name: String,
    items: BTreeSet<ItemId>,
    total: Amount,
    tax_share: Amount,
}

impl Roommate {
    pub fn new(id: RoommateId, name: impl Into<String>) -> Self {
        Roommate {
            id,
            name: name.into(),
            items: BTreeSet::new(),
            total: Amount::zero(),
            tax_share: Amount::zero(),
        }
    }

    #[inline]
    pub fn id(&self) -> RoommateId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Line items this roommate participates in, ascending.
    #[inline]
    pub fn items(&self) -> &BTreeSet<ItemId> {
        &self.items
    }

    pub fn add_line_item(&mut self, item_id: ItemId) {
        self.items.insert(item_id);
    }

    pub fn add_line_items(&mut self, item_ids: impl IntoIterator<Item = ItemId>) {
        self.items.extend(item_ids);
    }

    /// Returns false if the roommate was not on that item.
    pub fn remove_line_item(&mut self, item_id: ItemId) -> bool {
        self.items.remove(&item_id)
    }

    /// Running total owed, tax included once allocation finishes.
    #[inline]
    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn add_to_total(&mut self, amount: Amount) {
        self.total += amount;
    }

    #[inline]
    pub fn tax_share(&self) -> Amount {
        self.tax_share
    }

    /// Overwrites, never accumulates.
    pub fn set_tax_share(&mut self, tax_share: Amount) {
        self.tax_share = tax_share;
    }

    /// True while nothing has been allocated to this roommate yet.
    pub fn is_unallocated(&self) -> bool {
        self.items.is_empty() && self.total.is_zero() && self.tax_share.is_zero()
    }
}

impl fmt::Display for Roommate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "id: {}", self.id)?;
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "items:")?;
        for (i, item_id) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "id: {}", item_id)?;
        }
        writeln!(f)?;
        writeln!(f, "total: {}", self.total)?;
        writeln!(f, "tax_share: {}", self.tax_share)
    }
}

// =============================================================================
// Roommates
// =============================================================================

/// Id-keyed collection of roommates, owned by the caller independently of
/// the cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roommates {
    by_id: BTreeMap<RoommateId, Roommate>,
}

impl Roommates {
    pub fn new() -> Self {
        Roommates::default()
    }

    /// Inserts a roommate, returning any previous entry with the same id.
    pub fn insert(&mut self, roommate: Roommate) -> Option<Roommate> {
        self.by_id.insert(roommate.id(), roommate)
    }

    pub fn get(&self, id: RoommateId) -> Option<&Roommate> {
        self.by_id.get(&id)
    }

    pub fn get_mut(&mut self, id: RoommateId) -> Option<&mut Roommate> {
        self.by_id.get_mut(&id)
    }

    pub fn contains(&self, id: RoommateId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Smallest id greater than every id in use, or `None` once
    /// `RoommateId::MAX` is taken.
    ///
    /// Loaders use this to hand out sequential ids.
    pub fn next_id(&self) -> Option<RoommateId> {
        match self.by_id.keys().next_back() {
            Some(id) => id.checked_add(1),
            None => Some(0),
        }
    }

    /// Roommates in ascending id order.
    pub fn iter(&self) -> btree_map::Values<'_, RoommateId, Roommate> {
        self.by_id.values()
    }

    pub fn iter_mut(&mut self) -> btree_map::ValuesMut<'_, RoommateId, Roommate> {
        self.by_id.values_mut()
    }

    /// Sum of every roommate's total.
    pub fn total(&self) -> Amount {
        self.iter().map(Roommate::total).sum()
    }
}

impl FromIterator<Roommate> for Roommates {
    fn from_iter<I: IntoIterator<Item = Roommate>>(iter: I) -> Self {
        let mut roommates = Roommates::new();
        for roommate in iter {
            roommates.insert(roommate);
        }
        roommates
    }
}

impl<'a> IntoIterator for &'a Roommates {
    type Item = &'a Roommate;
    type IntoIter = btree_map::Values<'a, RoommateId, Roommate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shared bill.
///
/// ## Invariants (enforced by validation, not construction)
/// - `total == sum(item costs) + tax`
/// - `total > 0`, `tax >= 0`, every `cost >= 0`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    total: Amount,
    tax: Amount,
    items: BTreeMap<ItemId, LineItem>,
}

impl Cart {
    /// Creates an empty cart with the declared total and tax.
    pub fn new(total: Amount, tax: Amount) -> Self {
        Cart {
            total,
            tax,
            items: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn set_total(&mut self, total: Amount) {
        self.total = total;
    }

    #[inline]
    pub fn tax(&self) -> Amount {
        self.tax
    }

    pub fn set_tax(&mut self, tax: Amount) {
        self.tax = tax;
    }

    /// Adds an item, replacing any existing item with the same id.
    pub fn add_line_item(&mut self, item: LineItem) -> Option<LineItem> {
        self.items.insert(item.id(), item)
    }

    pub fn remove_line_item(&mut self, id: ItemId) -> Option<LineItem> {
        self.items.remove(&id)
    }

    pub fn line_item(&self, id: ItemId) -> Option<&LineItem> {
        self.items.get(&id)
    }

    /// Line items in ascending id order.
    pub fn line_items(&self) -> btree_map::Values<'_, ItemId, LineItem> {
        self.items.values()
    }

    pub(crate) fn line_items_mut(&mut self) -> btree_map::ValuesMut<'_, ItemId, LineItem> {
        self.items.values_mut()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item costs, accumulated in ascending id order.
    pub fn items_subtotal(&self) -> Amount {
        self.line_items().map(LineItem::cost).sum()
    }

    /// Declared total minus tax; the base for tax proportions.
    pub fn pre_tax_total(&self) -> Amount {
        self.total - self.tax
    }
}

impl fmt::Display for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total: {}", self.total)?;
        writeln!(f, "tax: {}", self.tax)?;
        writeln!(f, "items:")?;
        for (i, item) in self.line_items().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

fn write_ids(f: &mut fmt::Formatter<'_>, ids: &BTreeSet<RoommateId>) -> fmt::Result {
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", id)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_starts_without_share() {
        let item = LineItem::new(0, "milk", Amount::new(3.25), [1, 0, 1]);
        assert_eq!(item.share_cost(), Amount::zero());
        assert_eq!(item.splitter_count(), 2);
        assert_eq!(item.splitters().iter().copied().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_line_item_display() {
        let item = LineItem::new(1, "milk", Amount::new(3.25), [0, 1]);
        assert_eq!(
            item.to_string(),
            "id: 1 name: milk cost: $3.25 shared cost: $0.00 rms_split: {0, 1}"
        );
    }

    #[test]
    fn test_roommate_tax_share_overwrites() {
        let mut rm = Roommate::new(0, "David");
        rm.set_tax_share(Amount::new(1.0));
        rm.set_tax_share(Amount::new(0.5));
        assert_eq!(rm.tax_share().value(), 0.5);

        rm.add_to_total(Amount::new(2.0));
        rm.add_to_total(Amount::new(0.5));
        assert_eq!(rm.total().value(), 2.5);
    }

    #[test]
    fn test_roommate_items() {
        let mut rm = Roommate::new(0, "Erica");
        rm.add_line_items([3, 0, 1]);
        rm.add_line_item(3);
        assert_eq!(rm.items().len(), 3);
        assert!(rm.remove_line_item(0));
        assert!(!rm.remove_line_item(0));
    }

    #[test]
    fn test_roommate_display() {
        let mut rm = Roommate::new(2, "Sarah");
        rm.add_line_items([0, 4]);
        rm.add_to_total(Amount::new(2.04));
        rm.set_tax_share(Amount::new(0.15));
        assert_eq!(
            rm.to_string(),
            "id: 2\nname: Sarah\nitems:\nid: 0\nid: 4\ntotal: $2.04\ntax_share: $0.15\n"
        );
    }

    #[test]
    fn test_roommate_is_unallocated() {
        let mut rm = Roommate::new(0, "David");
        assert!(rm.is_unallocated());

        rm.add_line_item(2);
        assert!(!rm.is_unallocated());
        rm.remove_line_item(2);
        assert!(rm.is_unallocated());

        rm.set_tax_share(Amount::new(0.1));
        assert!(!rm.is_unallocated());
    }

    #[test]
    fn test_roommates_next_id() {
        let mut roommates = Roommates::new();
        assert_eq!(roommates.next_id(), Some(0));
        roommates.insert(Roommate::new(0, "David"));
        roommates.insert(Roommate::new(4, "Erica"));
        assert_eq!(roommates.next_id(), Some(5));
    }

    #[test]
    fn test_roommates_next_id_at_max() {
        let roommates: Roommates = [Roommate::new(RoommateId::MAX, "Last")].into_iter().collect();
        assert_eq!(roommates.next_id(), None);
    }

    #[test]
    fn test_roommates_from_iter_is_ordered() {
        let roommates: Roommates = [Roommate::new(2, "c"), Roommate::new(0, "a"), Roommate::new(1, "b")]
            .into_iter()
            .collect();
        let names: Vec<&str> = roommates.iter().map(Roommate::name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cart_replaces_item_with_same_id() {
        let mut cart = Cart::new(Amount::new(5.0), Amount::zero());
        assert!(cart.add_line_item(LineItem::new(0, "a", Amount::new(1.0), [0])).is_none());
        let previous = cart.add_line_item(LineItem::new(0, "b", Amount::new(5.0), [0]));
        assert_eq!(previous.map(|i| i.name().to_string()), Some("a".to_string()));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_cart_subtotals() {
        let mut cart = Cart::new(Amount::new(16.71), Amount::new(1.25));
        cart.add_line_item(LineItem::new(0, "chicken breast", Amount::new(5.67), [0, 1, 2]));
        cart.add_line_item(LineItem::new(1, "milk", Amount::new(3.25), [0, 1]));
        cart.add_line_item(LineItem::new(2, "bacon", Amount::new(2.56), [0]));
        cart.add_line_item(LineItem::new(3, "peanut butter", Amount::new(3.98), [1]));

        assert!((cart.items_subtotal().value() - 15.46).abs() < 1e-9);
        assert!((cart.pre_tax_total().value() - 15.46).abs() < 1e-9);

        assert!(cart.remove_line_item(3).is_some());
        assert!(cart.remove_line_item(3).is_none());
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_cart_display() {
        let mut cart = Cart::new(Amount::new(3.0), Amount::zero());
        cart.add_line_item(LineItem::new(0, "a", Amount::new(1.0), [0]));
        cart.add_line_item(LineItem::new(1, "b", Amount::new(2.0), [0, 1]));
        assert_eq!(
            cart.to_string(),
            "total: $3.00\ntax: $0.00\nitems:\n\
             id: 0 name: a cost: $1.00 shared cost: $0.00 rms_split: {0}\n\
             id: 1 name: b cost: $2.00 shared cost: $0.00 rms_split: {0, 1}"
        );
    }
}
