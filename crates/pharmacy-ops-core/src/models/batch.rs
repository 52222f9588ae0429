//! Sellable batches and cart lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A discrete lot of a medication available for sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Batch {
    /// Medication name
    pub med_name: String,
    /// Batch identifier (assumed unique within an available list)
    pub batch_id: String,
    /// Expiry date as reported by the backend
    pub expiry_date: String,
    /// Units available for sale
    pub quantity: u32,
    /// Unit selling price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Days until expiry as reported by the backend
    pub days_left: i64,
}

/// A cart line: a batch plus the quantity being sold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    #[serde(flatten)]
    pub batch: Batch,
    /// Units in the cart, always in `1..=batch.quantity`
    pub cart_qty: u32,
}

impl CartItem {
    /// Price × quantity for this line.
    pub fn line_total(&self) -> Decimal {
        self.batch.price * Decimal::from(self.cart_qty)
    }
}
