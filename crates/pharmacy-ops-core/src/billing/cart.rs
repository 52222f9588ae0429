//! Point-of-sale cart.
//!
//! Lines are keyed by batch id. Every line satisfies
//! `1 <= cart_qty <= batch.quantity`; operations that would break this are
//! rejected without touching the cart.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Batch, CartItem, CheckoutLine, CheckoutPayload};

/// Cart errors. Each one leaves the cart unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("Max stock reached for this batch.")]
    MaxStockReached { batch_id: String, available: u32 },

    #[error("Exceeds available stock.")]
    ExceedsAvailableStock {
        batch_id: String,
        requested: i64,
        available: u32,
    },

    #[error("Batch not available: {0}")]
    UnknownBatch(String),

    #[error("Checkout in progress.")]
    CheckoutInProgress,
}

pub type CartResult<T> = Result<T, CartError>;

/// What a successful cart operation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    Added { batch_id: String, med_name: String },
    Incremented { batch_id: String, cart_qty: u32 },
    Updated { batch_id: String, cart_qty: u32 },
    Removed { batch_id: String },
    Unchanged,
}

impl CartEvent {
    /// Acknowledgement to show the user, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            CartEvent::Added { med_name, .. } => Some(format!("Added {}", med_name)),
            CartEvent::Incremented { batch_id, cart_qty } => {
                Some(format!("{} × {}", batch_id, cart_qty))
            }
            _ => None,
        }
    }
}

/// The cart of one billing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line for a batch.
    pub fn get(&self, batch_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.batch.batch_id == batch_id)
    }

    /// Add one unit of a batch: a new line with quantity 1, or +1 on the
    /// existing line unless it already holds all available stock.
    pub fn add(&mut self, batch: &Batch) -> CartResult<CartEvent> {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.batch.batch_id == batch.batch_id)
        {
            if existing.cart_qty >= batch.quantity {
                warn!(batch_id = %batch.batch_id, available = batch.quantity, "max stock reached");
                return Err(CartError::MaxStockReached {
                    batch_id: batch.batch_id.clone(),
                    available: batch.quantity,
                });
            }
            existing.cart_qty += 1;
            return Ok(CartEvent::Incremented {
                batch_id: batch.batch_id.clone(),
                cart_qty: existing.cart_qty,
            });
        }

        if batch.quantity == 0 {
            return Err(CartError::MaxStockReached {
                batch_id: batch.batch_id.clone(),
                available: 0,
            });
        }

        self.items.push(CartItem {
            batch: batch.clone(),
            cart_qty: 1,
        });
        debug!(batch_id = %batch.batch_id, "added cart line");
        Ok(CartEvent::Added {
            batch_id: batch.batch_id.clone(),
            med_name: batch.med_name.clone(),
        })
    }

    /// Change a line's quantity by `delta`.
    ///
    /// Going above available stock is an error. Going below 1 is silently
    /// ignored: lines leave the cart only through [`Cart::remove`].
    pub fn update_qty(&mut self, batch_id: &str, delta: i64) -> CartResult<CartEvent> {
        let Some(line) = self.items.iter_mut().find(|i| i.batch.batch_id == batch_id) else {
            return Ok(CartEvent::Unchanged);
        };

        let requested = i64::from(line.cart_qty).checked_add(delta);
        let new_qty = match requested {
            Some(qty) if qty <= i64::from(line.batch.quantity) => qty,
            _ => {
                let requested = requested.unwrap_or(i64::MAX);
                warn!(batch_id, requested, available = line.batch.quantity, "exceeds available stock");
                return Err(CartError::ExceedsAvailableStock {
                    batch_id: batch_id.to_string(),
                    requested,
                    available: line.batch.quantity,
                });
            }
        };
        if new_qty < 1 {
            return Ok(CartEvent::Unchanged);
        }

        // Bounded by batch.quantity above, so it fits in u32
        line.cart_qty = new_qty as u32;
        Ok(CartEvent::Updated {
            batch_id: batch_id.to_string(),
            cart_qty: line.cart_qty,
        })
    }

    /// Remove a line. No-op when absent.
    pub fn remove(&mut self, batch_id: &str) -> CartEvent {
        let before = self.items.len();
        self.items.retain(|i| i.batch.batch_id != batch_id);
        if self.items.len() == before {
            CartEvent::Unchanged
        } else {
            CartEvent::Removed {
                batch_id: batch_id.to_string(),
            }
        }
    }

    /// Bring lines in line with a fresh list of available batches.
    ///
    /// Each line takes the new batch record. Lines whose batch is gone or
    /// out of stock are dropped; lines holding more than the new stock are
    /// clamped to it. Returns what changed.
    pub fn reconcile(&mut self, available: &[Batch]) -> Vec<CartEvent> {
        let mut events = Vec::new();
        self.items.retain_mut(|line| {
            let fresh = available
                .iter()
                .find(|b| b.batch_id == line.batch.batch_id)
                .filter(|b| b.quantity > 0);
            let Some(fresh) = fresh else {
                warn!(batch_id = %line.batch.batch_id, "cart line no longer available");
                events.push(CartEvent::Removed {
                    batch_id: line.batch.batch_id.clone(),
                });
                return false;
            };

            line.batch = fresh.clone();
            if line.cart_qty > fresh.quantity {
                warn!(
                    batch_id = %fresh.batch_id,
                    cart_qty = line.cart_qty,
                    available = fresh.quantity,
                    "clamping cart line to refreshed stock"
                );
                line.cart_qty = fresh.quantity;
                events.push(CartEvent::Updated {
                    batch_id: fresh.batch_id.clone(),
                    cart_qty: line.cart_qty,
                });
            }
            true
        });
        events
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Itemized checkout request for the current lines.
    pub fn to_payload(&self) -> CheckoutPayload {
        CheckoutPayload {
            items: self.items.iter().map(CheckoutLine::from).collect(),
        }
    }
}
