//! Client tests against a loopback HTTP stub.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use pharmacy_ops_client::{ClientConfig, DashboardClient};
use pharmacy_ops_core::billing::{checkout, BackendError, BillingBackend, BillingSession, CheckoutError};
use pharmacy_ops_core::models::{CheckoutLine, CheckoutPayload};

/// Canned response for one `METHOD /path` (query string ignored).
#[derive(Clone)]
struct Route {
    method: &'static str,
    path: &'static str,
    status: u16,
    body: &'static str,
    delay: Option<Duration>,
}

impl Route {
    fn new(method: &'static str, path: &'static str, status: u16, body: &'static str) -> Self {
        Self { method, path, status, body, delay: None }
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request as seen by the stub.
#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    target: String,
    body: String,
}

struct Stub {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Stub {
    async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else { break };
                let routes = routes.clone();
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move { serve(stream, routes, recorded).await });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    fn client(&self, timeout_secs: u64) -> DashboardClient {
        DashboardClient::new(ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_secs: timeout_secs,
            ..ClientConfig::default()
        })
        .unwrap()
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve(mut stream: TcpStream, routes: Vec<Route>, recorded: Arc<Mutex<Vec<Recorded>>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default().to_string();
    let path = target.split('?').next().unwrap_or_default().to_string();
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    recorded.lock().unwrap().push(Recorded {
        method: method.clone(),
        target,
        body,
    });

    let route = routes
        .iter()
        .find(|r| r.method == method && r.path == path)
        .cloned()
        .unwrap_or_else(|| Route::new("", "", 404, r#"{"detail": "Not Found"}"#));

    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }

    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        route.status,
        route.body.len(),
        route.body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

const ALERTS: &str = r#"{
    "kpi": {"critical_items": 1, "value_at_risk": 120.5, "potential_recovery": 60.25, "items_monitored": 3},
    "drugs": [
        {"name": "Paracetamol", "category": "Analgesic", "batches": [
            {"id": "P-1", "expiry": "2025-01-01", "qty": 2, "price": 2.5, "days_left": 120, "status": "Good"},
            {"id": "P-0", "expiry": "2024-02-01", "qty": 0, "price": 2.5, "days_left": 5, "status": "Critical"}
        ]},
        {"name": "Cetirizine", "batches": [
            {"id": "C-1", "expiry": "2025-03-01", "qty": 4, "price": 1.2, "days_left": 180}
        ]}
    ]
}"#;

fn payload() -> CheckoutPayload {
    CheckoutPayload {
        items: vec![CheckoutLine {
            med_name: "Paracetamol".into(),
            batch_id: "P-1".into(),
            quantity: 2,
            price: Decimal::new(25, 1),
        }],
    }
}

#[tokio::test]
async fn test_fetch_inventory_resolves_aliases() {
    let stub = Stub::start(vec![Route::new(
        "GET",
        "/inventory",
        200,
        r#"[
            {"med_name": "Amoxicillin", "quantity": 40, "expiry_date": "2024-05-01", "batch_id": "A-1", "status": "Low"},
            {"SKU_ID": "Insulin", "Qty_On_Hand": "7", "Expiry_Date": "2024-02-01", "is_outbreak": true},
            {"quantity": null}
        ]"#,
    )])
    .await;

    let items = stub.client(5).fetch_inventory(None, Some("amo")).await.unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].drug_name, "Amoxicillin");
    assert_eq!(items[0].quantity, 40);
    assert_eq!(items[0].batch_number.as_deref(), Some("A-1"));
    assert_eq!(items[0].category.as_deref(), Some("Low"));
    assert_eq!(items[1].drug_name, "Insulin");
    assert_eq!(items[1].quantity, 7);
    assert!(items[1].is_outbreak);
    assert_eq!(items[2].drug_name, "Unknown");
    assert_eq!(items[2].quantity, 0);
    assert_eq!(items[2].batch_number.as_deref(), Some("-"));

    let requests = stub.requests();
    assert_eq!(requests[0].target, "/inventory?limit=1000&search=amo");
}

#[tokio::test]
async fn test_fetch_drugs_and_analytics() {
    let stub = Stub::start(vec![
        Route::new(
            "GET",
            "/drugs",
            200,
            r#"[{"brand_name": "Crocin", "generic_name": "Paracetamol", "manufacturer": "GSK"}]"#,
        ),
        Route::new("GET", "/forecast/detail", 200, r#"{"history": [1, 2, 3]}"#),
    ])
    .await;
    let client = stub.client(5);

    let drugs = client.fetch_drugs(Some(25), None).await.unwrap();
    assert_eq!(drugs.len(), 1);
    assert_eq!(drugs[0].generic_name, "Paracetamol");
    assert_eq!(drugs[0].dosage, "");

    let detail = client.fetch_forecast_detail("Paracetamol").await.unwrap();
    assert_eq!(detail["history"][2], 3);

    let targets: Vec<_> = stub.requests().into_iter().map(|r| r.target).collect();
    assert_eq!(targets, vec!["/drugs?limit=25", "/forecast/detail?med_name=Paracetamol"]);
}

#[tokio::test]
async fn test_available_batches_from_alerts() {
    let stub = Stub::start(vec![Route::new("GET", "/expiry/alerts", 200, ALERTS)]).await;

    let batches = stub.client(5).fetch_available_batches().await.unwrap();

    let ids: Vec<_> = batches.iter().map(|b| b.batch_id.as_str()).collect();
    assert_eq!(ids, vec!["P-1", "C-1"]);
    assert_eq!(batches[0].price, Decimal::new(25, 1));
    assert_eq!(batches[1].med_name, "Cetirizine");
}

#[tokio::test]
async fn test_checkout_posts_itemized_payload() {
    let stub = Stub::start(vec![Route::new("POST", "/billing/checkout", 200, r#"{"status": "ok"}"#)]).await;

    stub.client(5).submit_checkout(&payload()).await.unwrap();

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    let sent: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(
        sent,
        serde_json::json!({"items": [{"med_name": "Paracetamol", "batch_id": "P-1", "quantity": 2, "price": 2.5}]})
    );
}

#[tokio::test]
async fn test_rejection_carries_detail() {
    let stub = Stub::start(vec![
        Route::new("POST", "/billing/checkout", 400, r#"{"detail": "Insufficient stock for P-1"}"#),
        Route::new("POST", "/inventory/add", 500, "Internal Server Error"),
    ])
    .await;
    let client = stub.client(5);

    let err = client.submit_checkout(&payload()).await.unwrap_err();
    assert_eq!(
        err,
        BackendError::Rejected {
            status: 400,
            detail: Some("Insufficient stock for P-1".into())
        }
    );
    assert_eq!(err.user_message(), "Insufficient stock for P-1");

    let entry = pharmacy_ops_core::models::NewStockEntry {
        med_name: "Zinc".into(),
        batch_id: "Z-1".into(),
        expiry_date: "2026-01-01".into(),
        quantity: 10,
        cost_price: Decimal::ONE,
    };
    let err = client.add_stock(&entry).await.unwrap_err();
    assert_eq!(err, BackendError::Rejected { status: 500, detail: None });
    assert_eq!(err.user_message(), "Transaction failed");
}

#[tokio::test]
async fn test_bad_json_is_decode_error() {
    let stub = Stub::start(vec![Route::new("GET", "/expiry/alerts", 200, "{not json")]).await;

    let err = stub.client(5).fetch_expiry_alerts().await.unwrap_err();
    assert!(matches!(err, BackendError::Decode(_)));
}

#[tokio::test]
async fn test_stalled_backend_times_out() {
    let stub = Stub::start(vec![
        Route::new("POST", "/billing/checkout", 200, "{}").slow(Duration::from_secs(5)),
    ])
    .await;

    let err = stub.client(1).submit_checkout(&payload()).await.unwrap_err();
    assert_eq!(err, BackendError::Timeout);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = DashboardClient::new(ClientConfig {
        base_url: format!("http://{}", addr),
        ..ClientConfig::default()
    })
    .unwrap();

    let err = client.fetch_reorder().await.unwrap_err();
    assert!(matches!(err, BackendError::Transport(_)));
}

#[tokio::test]
async fn test_session_checkout_end_to_end() {
    let stub = Stub::start(vec![
        Route::new("GET", "/expiry/alerts", 200, ALERTS),
        Route::new("POST", "/billing/checkout", 200, r#"{"status": "ok"}"#),
    ])
    .await;
    let client = stub.client(5);

    let mut session = BillingSession::new();
    session.replace_available(client.fetch_available_batches().await.unwrap());

    assert_eq!(checkout(&mut session, &client).await, Err(CheckoutError::EmptyCart));
    assert!(stub.requests().iter().all(|r| r.method == "GET"));

    session.add_to_cart("P-1").unwrap();
    session.add_to_cart("P-1").unwrap();
    session.add_to_cart("C-1").unwrap();

    let receipt = checkout(&mut session, &client).await.unwrap();
    assert_eq!(receipt.totals.subtotal, Decimal::new(62, 1));
    assert_eq!(receipt.totals.tax, Decimal::new(112, 2));
    assert!(session.cart().is_empty());

    // Alerts fetched once up front and once after the sale
    let methods: Vec<_> = stub.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, vec!["GET", "POST", "GET"]);
}
