//! Inventory normalization and FEFO views.
//!
//! Pipeline: Raw rows → Column mapping → Normalization → Status derivation → Sort & filter
//!
//! Every step is a pure function of its inputs. A refresh rebuilds the whole
//! collection; items are never edited in place.

mod aliases;
mod dates;
mod mapping;
mod normalizer;
mod pricing;
mod status;
mod view;

pub use aliases::*;
pub use dates::*;
pub use mapping::*;
pub use normalizer::*;
pub use pricing::*;
pub use status::*;
pub use view::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::InventoryItem;

/// An item together with its derived statuses, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    pub item: InventoryItem,
    pub expiry: ExpiryStatus,
    pub stock: StockStatus,
}

impl InventoryRow {
    /// Derive statuses for an item relative to `today`.
    pub fn derive(item: &InventoryItem, today: NaiveDate) -> Self {
        Self {
            item: item.clone(),
            expiry: derive_expiry_status(&item.expiry_date, today),
            stock: derive_stock_status(item.quantity),
        }
    }
}

/// Derive display rows for a slice of items.
pub fn derive_rows(items: &[InventoryItem], today: NaiveDate) -> Vec<InventoryRow> {
    items.iter().map(|item| InventoryRow::derive(item, today)).collect()
}
