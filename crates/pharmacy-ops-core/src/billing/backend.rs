//! The seam between the billing engine and the pharmacy backend API.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Batch, CheckoutPayload, NewStockEntry};

/// Message shown when the backend gives no reason for a failure.
pub const GENERIC_FAILURE: &str = "Transaction failed";

/// Backend call failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Backend rejected the request ({status}): {}", .detail.as_deref().unwrap_or(GENERIC_FAILURE))]
    Rejected { status: u16, detail: Option<String> },

    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

impl BackendError {
    /// Text for the failure notification: the server's detail when it sent
    /// one, otherwise a generic message. Timeouts are reported as such.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Rejected {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            BackendError::Timeout => "Request timed out. Please try again.".to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Operations the billing engine needs from the backend.
///
/// Implementations must not retry `submit_checkout`: the backend has no
/// idempotency guard, so a retried sale can be recorded twice.
#[async_trait]
pub trait BillingBackend: Send + Sync {
    /// Batches currently available for sale, in display order.
    async fn fetch_available_batches(&self) -> BackendResult<Vec<Batch>>;

    /// Record a sale.
    async fn submit_checkout(&self, payload: &CheckoutPayload) -> BackendResult<()>;

    /// Receive new stock.
    async fn add_stock(&self, entry: &NewStockEntry) -> BackendResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let rejected = BackendError::Rejected {
            status: 400,
            detail: Some("Insufficient stock for batch P-1".into()),
        };
        assert_eq!(rejected.user_message(), "Insufficient stock for batch P-1");

        let bare = BackendError::Rejected { status: 500, detail: None };
        assert_eq!(bare.user_message(), "Transaction failed");
        assert_eq!(bare.to_string(), "Backend rejected the request (500): Transaction failed");

        let empty = BackendError::Rejected { status: 500, detail: Some(String::new()) };
        assert_eq!(empty.user_message(), "Transaction failed");

        assert_eq!(BackendError::Transport("connection refused".into()).user_message(), "Transaction failed");
        assert_ne!(BackendError::Timeout.user_message(), "Transaction failed");
    }
}
