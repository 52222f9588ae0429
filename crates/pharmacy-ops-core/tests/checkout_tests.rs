//! Checkout and stock entry against an in-memory backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use pharmacy_ops_core::billing::{
    add_stock, checkout, refresh_available, BackendError, BackendResult, BillingBackend,
    BillingSession, CheckoutError, SessionState, StockEntryError,
};
use pharmacy_ops_core::models::{Batch, CheckoutPayload, NewStockEntry};

fn batch(id: &str, quantity: u32, price: i64) -> Batch {
    Batch {
        med_name: format!("Drug {}", id),
        batch_id: id.to_string(),
        expiry_date: "2025-01-01".into(),
        quantity,
        price: Decimal::from(price),
        days_left: 200,
    }
}

/// Backend that records calls and answers from canned results.
struct MockBackend {
    checkout_result: BackendResult<()>,
    fetch_result: BackendResult<Vec<Batch>>,
    checkout_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    submitted: Mutex<Vec<CheckoutPayload>>,
    stock: Mutex<Vec<NewStockEntry>>,
}

impl MockBackend {
    fn new(checkout_result: BackendResult<()>, fetch_result: BackendResult<Vec<Batch>>) -> Self {
        Self {
            checkout_result,
            fetch_result,
            checkout_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
            stock: Mutex::new(Vec::new()),
        }
    }

    fn ok() -> Self {
        Self::new(Ok(()), Ok(vec![batch("B1", 3, 10)]))
    }
}

#[async_trait]
impl BillingBackend for MockBackend {
    async fn fetch_available_batches(&self) -> BackendResult<Vec<Batch>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetch_result.clone()
    }

    async fn submit_checkout(&self, payload: &CheckoutPayload) -> BackendResult<()> {
        self.checkout_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(payload.clone());
        self.checkout_result.clone()
    }

    async fn add_stock(&self, entry: &NewStockEntry) -> BackendResult<()> {
        self.stock.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

fn stocked_session() -> BillingSession {
    let mut session = BillingSession::new();
    session.replace_available(vec![batch("B1", 5, 10), batch("B2", 2, 5)]);
    session
}

#[tokio::test]
async fn test_empty_cart_makes_no_call() {
    let backend = MockBackend::ok();
    let mut session = stocked_session();

    let result = checkout(&mut session, &backend).await;

    assert_eq!(result, Err(CheckoutError::EmptyCart));
    assert_eq!(backend.checkout_calls.load(Ordering::SeqCst), 0);
    assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_success_clears_and_refreshes() {
    let backend = MockBackend::ok();
    let mut session = stocked_session();
    session.add_to_cart("B1").unwrap();
    session.add_to_cart("B1").unwrap();
    session.add_to_cart("B2").unwrap();
    session.set_customer_name("Ravi");

    let receipt = checkout(&mut session, &backend).await.unwrap();

    assert_eq!(receipt.totals.subtotal, Decimal::from(25));
    assert_eq!(receipt.totals.tax, Decimal::new(45, 1));
    assert_eq!(receipt.totals.total, Decimal::new(295, 1));
    assert_eq!(receipt.customer_name.as_deref(), Some("Ravi"));

    let submitted = backend.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].items[0].batch_id, "B1");
    assert_eq!(submitted[0].items[0].quantity, 2);

    assert_eq!(session.state(), SessionState::Empty);
    assert_eq!(session.customer_name(), "");
    assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.available(), &[batch("B1", 3, 10)]);
}

#[tokio::test]
async fn test_failure_leaves_cart_identical() {
    let backend = MockBackend::new(
        Err(BackendError::Rejected {
            status: 400,
            detail: Some("Insufficient stock".into()),
        }),
        Ok(vec![]),
    );
    let mut session = stocked_session();
    session.add_to_cart("B1").unwrap();
    session.update_qty("B1", 3).unwrap();
    session.add_to_cart("B2").unwrap();
    session.set_customer_name("Ravi");

    let before = serde_json::to_string(session.cart()).unwrap();
    let err = checkout(&mut session, &backend).await.unwrap_err();

    assert_eq!(err.user_message(), "Insufficient stock");
    assert_eq!(serde_json::to_string(session.cart()).unwrap(), before);
    assert_eq!(session.customer_name(), "Ravi");
    assert_eq!(session.state(), SessionState::Populated);
    // No refresh after a failed sale
    assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 0);
    assert_eq!(session.available().len(), 2);
}

#[tokio::test]
async fn test_timeout_is_reported_distinctly() {
    let backend = MockBackend::new(Err(BackendError::Timeout), Ok(vec![]));
    let mut session = stocked_session();
    session.add_to_cart("B2").unwrap();

    let err = checkout(&mut session, &backend).await.unwrap_err();

    assert_eq!(err, CheckoutError::Failed(BackendError::Timeout));
    assert_ne!(err.user_message(), "Transaction failed");
    assert_eq!(session.cart().len(), 1);
}

#[tokio::test]
async fn test_refresh_failure_does_not_fail_checkout() {
    let backend = MockBackend::new(Ok(()), Err(BackendError::Transport("connection reset".into())));
    let mut session = stocked_session();
    session.add_to_cart("B1").unwrap();

    let receipt = checkout(&mut session, &backend).await;

    assert!(receipt.is_ok());
    assert!(session.cart().is_empty());
    // Previous list is kept when the reload fails
    assert_eq!(session.available().len(), 2);
}

#[tokio::test]
async fn test_refresh_available_replaces_list() {
    let backend = MockBackend::ok();
    let mut session = stocked_session();

    let applied = refresh_available(&mut session, &backend).await.unwrap();

    assert!(applied);
    assert_eq!(session.available().len(), 1);
}

#[tokio::test]
async fn test_add_stock_validates_before_posting() {
    let backend = MockBackend::ok();
    let mut session = stocked_session();
    let mut entry = NewStockEntry {
        med_name: "Zinc".into(),
        batch_id: "Z-1".into(),
        expiry_date: "2026-05-31".into(),
        quantity: 0,
        cost_price: Decimal::new(150, 2),
    };

    let err = add_stock(&mut session, &backend, &entry).await.unwrap_err();
    assert_eq!(err, StockEntryError::ZeroQuantity);
    assert!(backend.stock.lock().unwrap().is_empty());

    entry.quantity = 40;
    add_stock(&mut session, &backend, &entry).await.unwrap();
    assert_eq!(backend.stock.lock().unwrap().len(), 1);
    assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 1);
}
