//! Validation of stock received at the counter.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::inventory::parse_expiry;
use crate::models::NewStockEntry;

use super::backend::BackendError;

/// Stock entry errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StockEntryError {
    #[error("Medicine name is required.")]
    MissingName,

    #[error("Batch ID is required.")]
    MissingBatch,

    #[error("Quantity must be greater than zero.")]
    ZeroQuantity,

    #[error("Cost price cannot be negative.")]
    NegativeCost,

    #[error("Invalid expiry date: {0}")]
    InvalidExpiry(String),

    #[error(transparent)]
    Failed(#[from] BackendError),
}

pub type StockEntryResult<T> = Result<T, StockEntryError>;

impl StockEntryError {
    /// Text for the failure notification.
    pub fn user_message(&self) -> String {
        match self {
            StockEntryError::Failed(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Check an entry before it is sent. Runs without any I/O.
pub fn validate_stock_entry(entry: &NewStockEntry) -> StockEntryResult<()> {
    if entry.med_name.trim().is_empty() {
        return Err(StockEntryError::MissingName);
    }
    if entry.batch_id.trim().is_empty() {
        return Err(StockEntryError::MissingBatch);
    }
    if entry.quantity == 0 {
        return Err(StockEntryError::ZeroQuantity);
    }
    if entry.cost_price < Decimal::ZERO {
        return Err(StockEntryError::NegativeCost);
    }
    if parse_expiry(&entry.expiry_date).is_none() {
        return Err(StockEntryError::InvalidExpiry(entry.expiry_date.clone()));
    }
    Ok(())
}
