//! # Snapshot Files
//!
//! The on-disk layout for a cart and its roommates.
//!
//! ## Layout
//! ```text
//! {
//!   "roommates": [
//!     { "id": 0, "name": "David", "items": [0, 1, 2], "total": 6.57, "tax_share": 0.49 }
//!   ],
//!   "cart": {
//!     "total": 16.71,
//!     "tax": 1.25,
//!     "line_items": [
//!       { "id": 0, "item_name": "chicken breast", "cost": 5.67,
//!         "share_cost": 1.89, "splitting": [0, 1, 2] }
//!     ]
//!   }
//! }
//! ```
//!
//! ## Loading Rules
//! - Both `roommates` and `cart` are required.
//! - A roommate without an `id` gets the next sequential id.
//! - `items`, `total`, `tax_share`, `share_cost`, `splitting` default to
//!   empty / zero, so an input file only needs names, costs and splitters.
//! - Duplicate ids are rejected rather than silently overwritten.
//! - An id-less roommate after one with id `u32::MAX` is rejected.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use cartsplit_core::{Amount, Cart, ItemId, LineItem, Roommate, RoommateId, Roommates};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SnapshotError, SnapshotResult};

/// A cart and roommate collection loaded together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub cart: Cart,
    pub roommates: Roommates,
}

// =============================================================================
// File Records
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    roommates: Option<Vec<RoommateRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cart: Option<CartRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RoommateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<RoommateId>,
    name: String,
    #[serde(default)]
    items: Vec<ItemId>,
    #[serde(default)]
    total: Amount,
    #[serde(default)]
    tax_share: Amount,
}

#[derive(Debug, Serialize, Deserialize)]
struct CartRecord {
    total: Amount,
    #[serde(default)]
    tax: Amount,
    #[serde(default)]
    line_items: Vec<LineItemRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LineItemRecord {
    id: ItemId,
    item_name: String,
    cost: Amount,
    #[serde(default)]
    share_cost: Amount,
    #[serde(default)]
    splitting: Vec<RoommateId>,
}

impl From<&Roommate> for RoommateRecord {
    fn from(roommate: &Roommate) -> Self {
        RoommateRecord {
            id: Some(roommate.id()),
            name: roommate.name().to_string(),
            items: roommate.items().iter().copied().collect(),
            total: roommate.total(),
            tax_share: roommate.tax_share(),
        }
    }
}

impl From<&LineItem> for LineItemRecord {
    fn from(item: &LineItem) -> Self {
        LineItemRecord {
            id: item.id(),
            item_name: item.name().to_string(),
            cost: item.cost(),
            share_cost: item.share_cost(),
            splitting: item.splitters().iter().copied().collect(),
        }
    }
}

impl SnapshotDocument {
    fn from_domain(cart: &Cart, roommates: &Roommates) -> Self {
        SnapshotDocument {
            roommates: Some(roommates.iter().map(RoommateRecord::from).collect()),
            cart: Some(CartRecord {
                total: cart.total(),
                tax: cart.tax(),
                line_items: cart.line_items().map(LineItemRecord::from).collect(),
            }),
        }
    }

    fn into_domain(self) -> SnapshotResult<Snapshot> {
        let roommate_records = self
            .roommates
            .ok_or(SnapshotError::MissingSection { section: "roommates" })?;
        let cart_record = self
            .cart
            .ok_or(SnapshotError::MissingSection { section: "cart" })?;

        let mut roommates = Roommates::new();
        for record in roommate_records {
            let id = match record.id {
                Some(id) => id,
                None => roommates
                    .next_id()
                    .ok_or(SnapshotError::IdsExhausted { entity: "roommate" })?,
            };
            let mut roommate = Roommate::new(id, record.name);
            roommate.add_line_items(record.items);
            roommate.add_to_total(record.total);
            roommate.set_tax_share(record.tax_share);

            if roommates.insert(roommate).is_some() {
                return Err(SnapshotError::DuplicateId {
                    entity: "roommate",
                    id,
                });
            }
        }

        let mut cart = Cart::new(cart_record.total, cart_record.tax);
        for record in cart_record.line_items {
            let id = record.id;
            let mut item = LineItem::new(id, record.item_name, record.cost, record.splitting);
            item.set_share_cost(record.share_cost);

            if cart.add_line_item(item).is_some() {
                return Err(SnapshotError::DuplicateId {
                    entity: "line item",
                    id,
                });
            }
        }

        Ok(Snapshot { cart, roommates })
    }
}

// =============================================================================
// Loader
// =============================================================================

/// Parses a snapshot from any reader.
pub fn read_snapshot<R: Read>(reader: R) -> SnapshotResult<Snapshot> {
    let document: SnapshotDocument =
        serde_json::from_reader(reader).map_err(SnapshotError::Parse)?;
    document.into_domain()
}

/// Loads a snapshot file. The file is closed before this returns.
pub fn load_snapshot(path: impl AsRef<Path>) -> SnapshotResult<Snapshot> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SnapshotError::io(path, e))?;
    let snapshot = read_snapshot(BufReader::new(file))?;

    debug!(
        path = %path.display(),
        roommates = snapshot.roommates.len(),
        line_items = snapshot.cart.item_count(),
        "Loaded snapshot"
    );
    Ok(snapshot)
}

// =============================================================================
// Writer
// =============================================================================

/// Writes a cart and its roommates as pretty-printed JSON.
pub fn write_snapshot<W: Write>(writer: W, cart: &Cart, roommates: &Roommates) -> SnapshotResult<()> {
    let document = SnapshotDocument::from_domain(cart, roommates);
    serde_json::to_writer_pretty(writer, &document).map_err(SnapshotError::Encode)
}

/// Creates (or truncates) `path` and writes the snapshot to it.
pub fn save_snapshot(
    path: impl AsRef<Path>,
    cart: &Cart,
    roommates: &Roommates,
) -> SnapshotResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SnapshotError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_snapshot(&mut writer, cart, roommates)?;
    writer.flush().map_err(|e| SnapshotError::io(path, e))?;

    debug!(path = %path.display(), "Saved snapshot");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
