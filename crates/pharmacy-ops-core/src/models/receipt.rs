//! Checkout payloads and receipts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::batch::CartItem;

/// One itemized line of a checkout request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutLine {
    pub med_name: String,
    pub batch_id: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<&CartItem> for CheckoutLine {
    fn from(item: &CartItem) -> Self {
        Self {
            med_name: item.batch.med_name.clone(),
            batch_id: item.batch.batch_id.clone(),
            quantity: item.cart_qty,
            price: item.batch.price,
        }
    }
}

/// Body of `POST /billing/checkout`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutPayload {
    pub items: Vec<CheckoutLine>,
}

/// Subtotal, tax and grand total of a cart.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Local record of a completed sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionReceipt {
    /// Client-generated id, used only for local correlation
    pub receipt_id: String,
    /// Customer name, absent for walk-in sales
    pub customer_name: Option<String>,
    /// Lines as submitted
    pub lines: Vec<CheckoutLine>,
    /// Totals at submission time
    pub totals: Totals,
    /// Completion timestamp (RFC 3339)
    pub completed_at: String,
}
