//! Billing session state.
//!
//! ```text
//! Empty ──add──▶ Populated ──begin_checkout──▶ Submitting
//!   ▲               ▲  │ add/update/remove         │
//!   │               │  └───────────────────────────┤
//!   │               └──── finish_checkout(Err) ────┤
//!   └──────────────────── finish_checkout(Ok) ─────┘
//! ```
//!
//! The session owns the available batches, the cart and the customer
//! name. The host UI holds the only mutable reference and drives the
//! network calls between [`BillingSession::begin_checkout`] and
//! [`BillingSession::finish_checkout`].

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Batch, CartItem, CheckoutPayload, Totals, TransactionReceipt};
use crate::refresh::{InventorySnapshot, RefreshTicket};

use super::backend::BackendError;
use super::cart::{Cart, CartError, CartEvent, CartResult};
use super::totals::compute_totals;

/// Checkout errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Cart is empty.")]
    EmptyCart,

    #[error("Checkout already in progress.")]
    InFlight,

    #[error(transparent)]
    Failed(#[from] BackendError),
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;

impl CheckoutError {
    /// Text for the failure notification.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Failed(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Where the session is in the checkout cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Empty,
    Populated,
    Submitting,
}

/// A checkout that has been started but not finished.
///
/// Holds a copy of what is being submitted so the receipt reflects the
/// request even though the cart is only cleared after success.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCheckout {
    pub payload: CheckoutPayload,
    pub totals: Totals,
    pub customer_name: Option<String>,
}

/// One billing counter session.
#[derive(Debug, Clone, Default)]
pub struct BillingSession {
    available: InventorySnapshot<Batch>,
    cart: Cart,
    customer_name: String,
    submitting: bool,
}

impl BillingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.submitting {
            SessionState::Submitting
        } else if self.cart.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Populated
        }
    }

    /// Batches currently offered for sale.
    pub fn available(&self) -> &[Batch] {
        self.available.items()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    pub fn totals(&self) -> Totals {
        compute_totals(&self.cart)
    }

    /// Replace the available batches outright.
    pub fn replace_available(&mut self, batches: Vec<Batch>) {
        self.available.replace(batches);
        self.reconcile_cart();
    }

    /// Start a refresh of the available batches.
    pub fn issue_refresh(&mut self) -> RefreshTicket {
        self.available.issue()
    }

    /// Apply a refresh response. Returns `false` if a newer response was
    /// already applied.
    ///
    /// Cart lines are reconciled against the new stock.
    pub fn apply_refresh(&mut self, ticket: RefreshTicket, batches: Vec<Batch>) -> bool {
        if !self.available.apply(ticket, batches) {
            return false;
        }
        self.reconcile_cart();
        true
    }

    fn reconcile_cart(&mut self) {
        let changes = self.cart.reconcile(self.available.items());
        if !changes.is_empty() {
            info!(changed = changes.len(), "cart reconciled with refreshed stock");
        }
    }

    /// Add one unit of an available batch.
    pub fn add_to_cart(&mut self, batch_id: &str) -> CartResult<CartEvent> {
        self.ensure_editable()?;
        let batch = self
            .available
            .items()
            .iter()
            .find(|b| b.batch_id == batch_id)
            .ok_or_else(|| CartError::UnknownBatch(batch_id.to_string()))?;
        self.cart.add(batch)
    }

    /// Add one unit of a batch picked outside the available list.
    pub fn add_batch(&mut self, batch: &Batch) -> CartResult<CartEvent> {
        self.ensure_editable()?;
        self.cart.add(batch)
    }

    pub fn update_qty(&mut self, batch_id: &str, delta: i64) -> CartResult<CartEvent> {
        self.ensure_editable()?;
        self.cart.update_qty(batch_id, delta)
    }

    pub fn remove(&mut self, batch_id: &str) -> CartResult<CartEvent> {
        self.ensure_editable()?;
        Ok(self.cart.remove(batch_id))
    }

    fn ensure_editable(&self) -> CartResult<()> {
        if self.submitting {
            warn!("cart change rejected during checkout");
            return Err(CartError::CheckoutInProgress);
        }
        Ok(())
    }

    /// Enter `Submitting` and capture the request to send.
    ///
    /// Fails without any state change on an empty cart or while another
    /// checkout is in flight.
    pub fn begin_checkout(&mut self) -> CheckoutResult<PendingCheckout> {
        if self.submitting {
            return Err(CheckoutError::InFlight);
        }
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.submitting = true;
        let name = self.customer_name.trim();
        Ok(PendingCheckout {
            payload: self.cart.to_payload(),
            totals: self.totals(),
            customer_name: (!name.is_empty()).then(|| name.to_string()),
        })
    }

    /// Leave `Submitting` with the backend's answer.
    ///
    /// On success the cart and customer name are cleared and a receipt is
    /// returned. On failure the cart is left exactly as it was.
    pub fn finish_checkout(
        &mut self,
        pending: PendingCheckout,
        outcome: Result<(), BackendError>,
    ) -> CheckoutResult<TransactionReceipt> {
        self.submitting = false;

        match outcome {
            Ok(()) => {
                self.cart.clear();
                self.customer_name.clear();

                let receipt = TransactionReceipt {
                    receipt_id: Uuid::new_v4().to_string(),
                    customer_name: pending.customer_name,
                    lines: pending.payload.items,
                    totals: pending.totals,
                    completed_at: Utc::now().to_rfc3339(),
                };
                info!(
                    receipt_id = %receipt.receipt_id,
                    lines = receipt.lines.len(),
                    total = %receipt.totals.total,
                    "checkout completed"
                );
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, "checkout failed");
                Err(CheckoutError::Failed(err))
            }
        }
    }

    /// Abandon an in-flight checkout whose response will never arrive.
    pub fn cancel_checkout(&mut self) {
        self.submitting = false;
    }
}
