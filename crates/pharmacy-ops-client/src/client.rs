//! HTTP client for the pharmacy backend.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use pharmacy_ops_core::billing::{BackendError, BackendResult, BillingBackend};
use pharmacy_ops_core::inventory::{api_mapping, normalize, resolve_api_rows};
use pharmacy_ops_core::models::{
    Batch, CheckoutPayload, DrugRecord, ExpiryAlerts, InventoryItem, NewStockEntry,
};

use crate::config::ClientConfig;
use crate::endpoints;
use crate::error::{ClientError, ClientResult};

/// Client for the dashboard's backend API.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl DashboardClient {
    /// Creates a client for the configured backend.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        reqwest::Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ClientError::Build(format!("invalid user agent: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Creates a client from the config file and environment.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::load()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Fetches stock rows and normalizes them through the alias table.
    pub async fn fetch_inventory(&self, limit: Option<u32>, search: Option<&str>) -> BackendResult<Vec<InventoryItem>> {
        let rows: Vec<Value> = self.get_list(endpoints::INVENTORY, limit, search).await?;
        let items = normalize(&resolve_api_rows(&rows), &api_mapping());
        debug!(count = items.len(), "normalized inventory rows");
        Ok(items)
    }

    /// Fetches the drug database.
    pub async fn fetch_drugs(&self, limit: Option<u32>, search: Option<&str>) -> BackendResult<Vec<DrugRecord>> {
        self.get_list(endpoints::DRUGS, limit, search).await
    }

    /// Fetches expiry alerts, the source of the billing screen's batches.
    pub async fn fetch_expiry_alerts(&self) -> BackendResult<ExpiryAlerts> {
        self.get_json(endpoints::EXPIRY_ALERTS, &[]).await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Submits a sale. Never retried.
    pub async fn submit_checkout(&self, payload: &CheckoutPayload) -> BackendResult<()> {
        self.post(endpoints::CHECKOUT, payload).await
    }

    /// Records received stock.
    pub async fn add_stock(&self, entry: &NewStockEntry) -> BackendResult<()> {
        self.post(endpoints::INVENTORY_ADD, entry).await
    }

    // =========================================================================
    // Analytics (passed through untyped)
    // =========================================================================

    pub async fn fetch_forecast(&self) -> BackendResult<Value> {
        self.get_json(endpoints::FORECAST, &[]).await
    }

    pub async fn fetch_forecast_detail(&self, med_name: &str) -> BackendResult<Value> {
        self.get_json(endpoints::FORECAST_DETAIL, &[("med_name", med_name.to_string())])
            .await
    }

    pub async fn fetch_reorder(&self) -> BackendResult<Value> {
        self.get_json(endpoints::REORDER, &[]).await
    }

    pub async fn fetch_waste_analytics(&self) -> BackendResult<Value> {
        self.get_json(endpoints::WASTE_ANALYTICS, &[]).await
    }

    pub async fn fetch_revenue_recovery(&self, med_name: &str, current_price: f64, days_left: i64) -> BackendResult<Value> {
        self.get_json(
            endpoints::REVENUE_RECOVERY,
            &[
                ("med_name", med_name.to_string()),
                ("current_price", current_price.to_string()),
                ("days_left", days_left.to_string()),
            ],
        )
        .await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    async fn get_list<T: DeserializeOwned>(&self, path: &str, limit: Option<u32>, search: Option<&str>) -> BackendResult<Vec<T>> {
        let mut query = vec![(
            "limit",
            limit.unwrap_or(self.config.inventory_limit).to_string(),
        )];
        if let Some(term) = search.filter(|s| !s.is_empty()) {
            query.push(("search", term.to_string()));
        }
        self.get_json(path, &query).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> BackendResult<T> {
        let url = self.config.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(map_transport)?;
        let body = check_status(response).await?;

        serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> BackendResult<()> {
        let url = self.config.url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_transport)?;
        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl BillingBackend for DashboardClient {
    async fn fetch_available_batches(&self) -> BackendResult<Vec<Batch>> {
        Ok(self.fetch_expiry_alerts().await?.available_batches())
    }

    async fn submit_checkout(&self, payload: &CheckoutPayload) -> BackendResult<()> {
        DashboardClient::submit_checkout(self, payload).await
    }

    async fn add_stock(&self, entry: &NewStockEntry) -> BackendResult<()> {
        DashboardClient::add_stock(self, entry).await
    }
}

/// Reads the body, turning non-2xx statuses into `Rejected`.
async fn check_status(response: Response) -> BackendResult<Vec<u8>> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport)?;

    if !status.is_success() {
        return Err(rejected(status, &body));
    }
    Ok(body.to_vec())
}

fn rejected(status: StatusCode, body: &[u8]) -> BackendError {
    BackendError::Rejected {
        status: status.as_u16(),
        detail: parse_error_detail(body),
    }
}

/// The `detail` field of an error body, if there is one.
///
/// String details are taken as-is; structured ones (validation error
/// lists) are passed on as compact JSON.
pub fn parse_error_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn map_transport(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout
    } else if err.is_decode() {
        BackendError::Decode(err.to_string())
    } else {
        BackendError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_detail() {
        assert_eq!(
            parse_error_detail(br#"{"detail": "Insufficient stock for P-1"}"#),
            Some("Insufficient stock for P-1".into())
        );
        assert_eq!(
            parse_error_detail(br#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#),
            Some(r#"[{"loc":["body"],"msg":"field required"}]"#.into())
        );
        assert_eq!(parse_error_detail(br#"{"detail": ""}"#), None);
        assert_eq!(parse_error_detail(br#"{"error": "x"}"#), None);
        assert_eq!(parse_error_detail(b"<html>502</html>"), None);
        assert_eq!(parse_error_detail(b""), None);
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config = ClientConfig {
            base_url: "not a url".into(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            DashboardClient::new(config),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_new_with_defaults() {
        let client = DashboardClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.config().url(endpoints::CHECKOUT), "http://localhost:8000/billing/checkout");
    }
}
