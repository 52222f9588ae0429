//! Stock entry submitted from the receiving counter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// New stock record for `POST /inventory/add`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewStockEntry {
    pub med_name: String,
    pub batch_id: String,
    pub expiry_date: String,
    pub quantity: u32,
    /// Purchase cost per unit
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
}
