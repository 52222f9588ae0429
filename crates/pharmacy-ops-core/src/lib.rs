//! Pharmacy Ops Core Library
//!
//! Inventory normalization, FEFO views and point-of-sale billing for a
//! pharmacy operations dashboard.
//!
//! # Architecture
//!
//! ```text
//!  CSV upload ──▶ Column mapping ─┐
//!                                 ├──▶ Normalize ──▶ Status ──▶ Sort & filter ──▶ View / Export
//!  GET /inventory ──▶ Aliases ────┘
//!
//!  GET /expiry/alerts ──▶ Available batches ──▶ Cart ──▶ Checkout ──▶ POST /billing/checkout
//!                                 ▲                                          │
//!                                 └────────────── refresh on success ────────┘
//! ```
//!
//! All state lives in one session object owned by the host UI. Transitions
//! are synchronous; the only I/O is the backend calls behind
//! [`billing::BillingBackend`].
//!
//! # Modules
//!
//! - [`models`]: Domain types (InventoryItem, Batch, CartItem, receipts)
//! - [`inventory`]: Column mapping, normalization, expiry/stock status, sort & filter
//! - [`billing`]: Cart engine, totals, checkout orchestration
//! - [`refresh`]: Latest-wins handling of overlapping fetches
//! - [`export`]: Inventory and receipt export

pub mod billing;
pub mod export;
pub mod inventory;
pub mod models;
pub mod refresh;

// Re-export commonly used types
pub use billing::{BackendError, BillingBackend, BillingSession, Cart, CartError, CheckoutError};
pub use inventory::{InventoryNormalizer, InventoryView, MappingDraft, SortState};
pub use models::{Batch, CartItem, FieldMapping, InventoryItem, LogicalField, TransactionReceipt};
pub use refresh::{InventorySnapshot, RefreshTicket, RefreshTracker};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use billing::PendingCheckout;
use inventory::{MatchField, SortKey, SortOrder, ViewQuery};
use models::{ExpiryAlerts, NewStockEntry};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PharmacyOpsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Mapping(String),

    #[error("{0}")]
    Cart(String),

    #[error("{0}")]
    Checkout(String),

    #[error("{0}")]
    StockEntry(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("State error: {0}")]
    StateError(String),
}

impl From<inventory::MappingError> for PharmacyOpsError {
    fn from(e: inventory::MappingError) -> Self {
        PharmacyOpsError::Mapping(e.to_string())
    }
}

impl From<CartError> for PharmacyOpsError {
    fn from(e: CartError) -> Self {
        PharmacyOpsError::Cart(e.to_string())
    }
}

impl From<CheckoutError> for PharmacyOpsError {
    fn from(e: CheckoutError) -> Self {
        PharmacyOpsError::Checkout(e.user_message())
    }
}

impl From<billing::StockEntryError> for PharmacyOpsError {
    fn from(e: billing::StockEntryError) -> Self {
        PharmacyOpsError::StockEntry(e.user_message())
    }
}

impl From<serde_json::Error> for PharmacyOpsError {
    fn from(e: serde_json::Error) -> Self {
        PharmacyOpsError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for PharmacyOpsError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PharmacyOpsError::StateError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create an empty session.
#[uniffi::export]
pub fn new_core() -> Arc<PharmacyOpsCore> {
    Arc::new(PharmacyOpsCore {
        state: Arc::new(Mutex::new(CoreState::default())),
    })
}

// =========================================================================
// Main API Object
// =========================================================================

#[derive(Debug, Default)]
struct CoreState {
    draft: Option<MappingDraft>,
    mapping: Option<FieldMapping>,
    inventory: InventorySnapshot<InventoryItem>,
    query: ViewQuery,
    billing: BillingSession,
    pending: Option<PendingCheckout>,
}

impl CoreState {
    fn view(&self) -> InventoryView {
        inventory::build_view(self.inventory.items(), &self.query)
    }
}

/// Session handle for the host UI.
#[derive(uniffi::Object)]
pub struct PharmacyOpsCore {
    state: Arc<Mutex<CoreState>>,
}

#[uniffi::export]
impl PharmacyOpsCore {
    // =========================================================================
    // Column Mapping
    // =========================================================================

    /// Start mapping an uploaded file by guessing columns from its headers.
    pub fn auto_map_headers(&self, headers: Vec<String>) -> Result<FfiMappingDraft, PharmacyOpsError> {
        let mut state = self.state.lock()?;
        let draft = inventory::auto_map(&headers);
        let ffi = FfiMappingDraft::from(&draft);
        state.draft = Some(draft);
        Ok(ffi)
    }

    /// Set or clear the column for one logical field.
    pub fn set_mapping_column(
        &self,
        field: FfiLogicalField,
        column: Option<String>,
    ) -> Result<FfiMappingDraft, PharmacyOpsError> {
        let mut state = self.state.lock()?;
        let draft = state
            .draft
            .as_mut()
            .ok_or_else(|| PharmacyOpsError::StateError("No mapping in progress".into()))?;

        match column {
            Some(column) => draft.set(field.into(), &column)?,
            None => draft.clear(field.into()),
        }
        Ok(FfiMappingDraft::from(&*draft))
    }

    /// Confirm the draft. Fails without changes if a required field is unset.
    pub fn confirm_mapping(&self) -> Result<(), PharmacyOpsError> {
        let mut state = self.state.lock()?;
        let draft = state
            .draft
            .as_ref()
            .ok_or_else(|| PharmacyOpsError::StateError("No mapping in progress".into()))?;
        let mapping = draft.confirm()?;
        state.mapping = Some(mapping);
        state.draft = None;
        Ok(())
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Replace the inventory with uploaded rows under the confirmed mapping.
    pub fn load_rows(&self, rows: Vec<HashMap<String, String>>) -> Result<u32, PharmacyOpsError> {
        let mut state = self.state.lock()?;
        let mapping = state
            .mapping
            .as_ref()
            .ok_or_else(|| PharmacyOpsError::Mapping("Please map all required fields".into()))?;
        let items = inventory::normalize(&rows, mapping);
        let count = u32::try_from(items.len()).unwrap_or(u32::MAX);
        state.inventory.replace(items);
        Ok(count)
    }

    /// Start an inventory fetch. Pass the ticket back with the response.
    pub fn issue_inventory_refresh(&self) -> Result<u64, PharmacyOpsError> {
        let mut state = self.state.lock()?;
        Ok(state.inventory.issue().generation())
    }

    /// Apply a `GET /inventory` response body. Returns `false` for a stale
    /// response.
    pub fn apply_inventory_json(&self, ticket: u64, json: String) -> Result<bool, PharmacyOpsError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(&json)?;
        let rows = inventory::resolve_api_rows(&values);
        let items = inventory::normalize(&rows, &inventory::api_mapping());

        let mut state = self.state.lock()?;
        Ok(state.inventory.apply(RefreshTicket::from_generation(ticket), items))
    }

    /// Sort by a column; the same column again flips the order.
    pub fn toggle_sort(&self, key: FfiSortKey) -> Result<(), PharmacyOpsError> {
        let mut state = self.state.lock()?;
        state.query.sort.toggle(key.into());
        Ok(())
    }

    pub fn set_search(&self, term: String, fields: Vec<FfiMatchField>) -> Result<(), PharmacyOpsError> {
        let mut state = self.state.lock()?;
        state.query.search = term;
        state.query.match_fields = if fields.is_empty() {
            vec![MatchField::DrugName]
        } else {
            fields.into_iter().map(Into::into).collect()
        };
        Ok(())
    }

    /// Current page of the inventory table. `today` is `YYYY-MM-DD`,
    /// defaulting to the local date.
    pub fn query_inventory(&self, today: Option<String>) -> Result<FfiInventoryPage, PharmacyOpsError> {
        let today = parse_today(today)?;
        let state = self.state.lock()?;
        let view = state.view();

        Ok(FfiInventoryPage {
            rows: view
                .visible()
                .iter()
                .map(|item| FfiInventoryRow::derive(item, today))
                .collect(),
            total: u32::try_from(view.total()).unwrap_or(u32::MAX),
            showing_label: view.showing_label(),
            sort_key: state.query.sort.key.into(),
            sort_descending: state.query.sort.order == SortOrder::Desc,
        })
    }

    /// Suggested selling price for an alert status and list price.
    pub fn discount_for(&self, status: String, price: String) -> Result<FfiDiscount, PharmacyOpsError> {
        let price = parse_money(&price)?;
        let strategy = inventory::discount_strategy(&status, price);
        Ok(FfiDiscount {
            pct: strategy.pct,
            price: strategy.price.to_string(),
            label: strategy.label,
        })
    }

    // =========================================================================
    // Billing
    // =========================================================================

    /// Start an available-batch fetch. Pass the ticket back with the response.
    pub fn issue_batch_refresh(&self) -> Result<u64, PharmacyOpsError> {
        let mut state = self.state.lock()?;
        Ok(state.billing.issue_refresh().generation())
    }

    /// Apply a `GET /expiry/alerts` response body. Returns `false` for a
    /// stale response.
    pub fn apply_alerts_json(&self, ticket: u64, json: String) -> Result<bool, PharmacyOpsError> {
        let alerts: ExpiryAlerts = serde_json::from_str(&json)?;
        let mut state = self.state.lock()?;
        Ok(state
            .billing
            .apply_refresh(RefreshTicket::from_generation(ticket), alerts.available_batches()))
    }

    /// Medicine search for the billing screen.
    pub fn search_batches(&self, query: String, limit: u32) -> Result<Vec<FfiBatch>, PharmacyOpsError> {
        let state = self.state.lock()?;
        Ok(billing::lookup_batches(state.billing.available(), &query, limit as usize)
            .into_iter()
            .map(FfiBatch::from)
            .collect())
    }

    /// Add one unit of a batch. Returns the acknowledgement to show.
    pub fn add_to_cart(&self, batch_id: String) -> Result<Option<String>, PharmacyOpsError> {
        let mut state = self.state.lock()?;
        let event = state.billing.add_to_cart(&batch_id)?;
        Ok(event.message())
    }

    pub fn update_cart_qty(&self, batch_id: String, delta: i64) -> Result<(), PharmacyOpsError> {
        let mut state = self.state.lock()?;
        state.billing.update_qty(&batch_id, delta)?;
        Ok(())
    }

    pub fn remove_from_cart(&self, batch_id: String) -> Result<(), PharmacyOpsError> {
        let mut state = self.state.lock()?;
        state.billing.remove(&batch_id)?;
        Ok(())
    }

    pub fn cart_items(&self) -> Result<Vec<FfiCartLine>, PharmacyOpsError> {
        let state = self.state.lock()?;
        Ok(state.billing.items().iter().map(FfiCartLine::from).collect())
    }

    pub fn totals(&self) -> Result<FfiTotals, PharmacyOpsError> {
        let state = self.state.lock()?;
        Ok(state.billing.totals().into())
    }

    pub fn set_customer_name(&self, name: String) -> Result<(), PharmacyOpsError> {
        let mut state = self.state.lock()?;
        state.billing.set_customer_name(name);
        Ok(())
    }

    pub fn customer_name(&self) -> Result<String, PharmacyOpsError> {
        let state = self.state.lock()?;
        Ok(state.billing.customer_name().to_string())
    }

    pub fn session_state(&self) -> Result<FfiSessionState, PharmacyOpsError> {
        let state = self.state.lock()?;
        Ok(state.billing.state().into())
    }

    /// Enter checkout and get the `POST /billing/checkout` body to send.
    pub fn begin_checkout(&self) -> Result<String, PharmacyOpsError> {
        let mut state = self.state.lock()?;
        let pending = state.billing.begin_checkout()?;
        let body = match serde_json::to_string(&pending.payload) {
            Ok(body) => body,
            Err(e) => {
                state.billing.cancel_checkout();
                return Err(e.into());
            }
        };
        state.pending = Some(pending);
        Ok(body)
    }

    /// Report the backend's answer to the checkout request.
    pub fn finish_checkout(&self, outcome: FfiCheckoutOutcome) -> Result<FfiReceipt, PharmacyOpsError> {
        let mut state = self.state.lock()?;
        let pending = state
            .pending
            .take()
            .ok_or_else(|| PharmacyOpsError::StateError("No checkout in progress".into()))?;
        let receipt = state.billing.finish_checkout(pending, outcome.into())?;
        Ok(receipt.into())
    }

    /// Abandon a checkout whose request never completed.
    pub fn cancel_checkout(&self) -> Result<(), PharmacyOpsError> {
        let mut state = self.state.lock()?;
        state.pending = None;
        state.billing.cancel_checkout();
        Ok(())
    }

    /// Validate received stock and get the `POST /inventory/add` body.
    pub fn prepare_stock_entry(&self, entry: FfiStockEntry) -> Result<String, PharmacyOpsError> {
        let entry = NewStockEntry::try_from(entry)?;
        billing::validate_stock_entry(&entry)?;
        Ok(serde_json::to_string(&entry)?)
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export every row matching the current view as CSV.
    pub fn export_inventory_csv(&self, today: Option<String>) -> Result<String, PharmacyOpsError> {
        let today = parse_today(today)?;
        let state = self.state.lock()?;
        Ok(export::InventoryExport::from_view(&state.view(), today).to_csv())
    }

    /// Export every row matching the current view as JSON.
    pub fn export_inventory_json(&self, today: Option<String>) -> Result<String, PharmacyOpsError> {
        let today = parse_today(today)?;
        let state = self.state.lock()?;
        Ok(export::InventoryExport::from_view(&state.view(), today).to_json()?)
    }
}

fn parse_today(today: Option<String>) -> Result<NaiveDate, PharmacyOpsError> {
    match today {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|e| PharmacyOpsError::InvalidInput(format!("{}: {}", s, e))),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn parse_money(s: &str) -> Result<Decimal, PharmacyOpsError> {
    Decimal::from_str(s.trim()).map_err(|e| PharmacyOpsError::InvalidInput(format!("{}: {}", s, e)))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe logical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiLogicalField {
    DrugName,
    Quantity,
    ExpiryDate,
    BatchNumber,
    Manufacturer,
    UnitPrice,
    Category,
    IsOutbreak,
}

impl From<FfiLogicalField> for LogicalField {
    fn from(field: FfiLogicalField) -> Self {
        match field {
            FfiLogicalField::DrugName => LogicalField::DrugName,
            FfiLogicalField::Quantity => LogicalField::Quantity,
            FfiLogicalField::ExpiryDate => LogicalField::ExpiryDate,
            FfiLogicalField::BatchNumber => LogicalField::BatchNumber,
            FfiLogicalField::Manufacturer => LogicalField::Manufacturer,
            FfiLogicalField::UnitPrice => LogicalField::UnitPrice,
            FfiLogicalField::Category => LogicalField::Category,
            FfiLogicalField::IsOutbreak => LogicalField::IsOutbreak,
        }
    }
}

impl From<LogicalField> for FfiLogicalField {
    fn from(field: LogicalField) -> Self {
        match field {
            LogicalField::DrugName => FfiLogicalField::DrugName,
            LogicalField::Quantity => FfiLogicalField::Quantity,
            LogicalField::ExpiryDate => FfiLogicalField::ExpiryDate,
            LogicalField::BatchNumber => FfiLogicalField::BatchNumber,
            LogicalField::Manufacturer => FfiLogicalField::Manufacturer,
            LogicalField::UnitPrice => FfiLogicalField::UnitPrice,
            LogicalField::Category => FfiLogicalField::Category,
            LogicalField::IsOutbreak => FfiLogicalField::IsOutbreak,
        }
    }
}

/// One row of the mapping dialog.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFieldMapping {
    pub field: FfiLogicalField,
    pub label: String,
    pub required: bool,
    pub column: Option<String>,
}

/// FFI-safe mapping draft.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMappingDraft {
    pub headers: Vec<String>,
    pub fields: Vec<FfiFieldMapping>,
    pub missing_required: Vec<FfiLogicalField>,
}

impl From<&MappingDraft> for FfiMappingDraft {
    fn from(draft: &MappingDraft) -> Self {
        Self {
            headers: draft.headers().to_vec(),
            fields: inventory::system_fields()
                .into_iter()
                .map(|f| FfiFieldMapping {
                    field: f.field.into(),
                    label: f.label.to_string(),
                    required: f.required,
                    column: draft.get(f.field).map(str::to_string),
                })
                .collect(),
            missing_required: draft.missing_required().into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSortKey {
    Expiry,
    Name,
    Quantity,
}

impl From<FfiSortKey> for SortKey {
    fn from(key: FfiSortKey) -> Self {
        match key {
            FfiSortKey::Expiry => SortKey::Expiry,
            FfiSortKey::Name => SortKey::Name,
            FfiSortKey::Quantity => SortKey::Quantity,
        }
    }
}

impl From<SortKey> for FfiSortKey {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Expiry => FfiSortKey::Expiry,
            SortKey::Name => FfiSortKey::Name,
            SortKey::Quantity => FfiSortKey::Quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiMatchField {
    DrugName,
    Manufacturer,
    Category,
    BatchNumber,
}

impl From<FfiMatchField> for MatchField {
    fn from(field: FfiMatchField) -> Self {
        match field {
            FfiMatchField::DrugName => MatchField::DrugName,
            FfiMatchField::Manufacturer => MatchField::Manufacturer,
            FfiMatchField::Category => MatchField::Category,
            FfiMatchField::BatchNumber => MatchField::BatchNumber,
        }
    }
}

/// FFI-safe inventory row with derived statuses.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInventoryRow {
    pub id: String,
    pub drug_name: String,
    pub quantity: u32,
    pub expiry_date: String,
    pub expiry_status: String,
    pub expiry_label: String,
    pub days_remaining: Option<i64>,
    pub stock_status: String,
    pub low_stock: bool,
    pub batch_number: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub unit_price: Option<String>,
    pub is_outbreak: bool,
}

impl FfiInventoryRow {
    fn derive(item: &InventoryItem, today: NaiveDate) -> Self {
        let row = inventory::InventoryRow::derive(item, today);
        Self {
            id: row.item.id,
            drug_name: row.item.drug_name,
            quantity: row.item.quantity,
            expiry_date: row.item.expiry_date,
            expiry_status: row.expiry.status.as_str().to_string(),
            expiry_label: row.expiry.label,
            days_remaining: row.expiry.days_remaining,
            stock_status: row.stock.label().to_string(),
            low_stock: row.stock.needs_attention(),
            batch_number: row.item.batch_number,
            manufacturer: row.item.manufacturer,
            category: row.item.category,
            unit_price: row.item.unit_price.map(|p| p.to_string()),
            is_outbreak: row.item.is_outbreak,
        }
    }
}

/// One page of the inventory table.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInventoryPage {
    pub rows: Vec<FfiInventoryRow>,
    pub total: u32,
    pub showing_label: Option<String>,
    pub sort_key: FfiSortKey,
    pub sort_descending: bool,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDiscount {
    pub pct: u32,
    pub price: String,
    pub label: String,
}

/// FFI-safe available batch.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBatch {
    pub med_name: String,
    pub batch_id: String,
    pub expiry_date: String,
    pub quantity: u32,
    pub price: String,
    pub days_left: i64,
}

impl From<&Batch> for FfiBatch {
    fn from(batch: &Batch) -> Self {
        Self {
            med_name: batch.med_name.clone(),
            batch_id: batch.batch_id.clone(),
            expiry_date: batch.expiry_date.clone(),
            quantity: batch.quantity,
            price: batch.price.to_string(),
            days_left: batch.days_left,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCartLine {
    pub batch: FfiBatch,
    pub cart_qty: u32,
    pub line_total: String,
}

impl From<&CartItem> for FfiCartLine {
    fn from(item: &CartItem) -> Self {
        Self {
            batch: FfiBatch::from(&item.batch),
            cart_qty: item.cart_qty,
            line_total: item.line_total().to_string(),
        }
    }
}

/// Money as decimal strings.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTotals {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl From<models::Totals> for FfiTotals {
    fn from(totals: models::Totals) -> Self {
        Self {
            subtotal: totals.subtotal.to_string(),
            tax: totals.tax.to_string(),
            total: totals.total.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSessionState {
    Empty,
    Populated,
    Submitting,
}

impl From<billing::SessionState> for FfiSessionState {
    fn from(state: billing::SessionState) -> Self {
        match state {
            billing::SessionState::Empty => FfiSessionState::Empty,
            billing::SessionState::Populated => FfiSessionState::Populated,
            billing::SessionState::Submitting => FfiSessionState::Submitting,
        }
    }
}

/// What the host observed when it sent the checkout request.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum FfiCheckoutOutcome {
    Success,
    Rejected { status: u16, detail: Option<String> },
    TimedOut,
    TransportFailed { message: String },
}

impl From<FfiCheckoutOutcome> for Result<(), BackendError> {
    fn from(outcome: FfiCheckoutOutcome) -> Self {
        match outcome {
            FfiCheckoutOutcome::Success => Ok(()),
            FfiCheckoutOutcome::Rejected { status, detail } => Err(BackendError::Rejected { status, detail }),
            FfiCheckoutOutcome::TimedOut => Err(BackendError::Timeout),
            FfiCheckoutOutcome::TransportFailed { message } => Err(BackendError::Transport(message)),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReceiptLine {
    pub med_name: String,
    pub batch_id: String,
    pub quantity: u32,
    pub price: String,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReceipt {
    pub receipt_id: String,
    pub customer_name: Option<String>,
    pub lines: Vec<FfiReceiptLine>,
    pub totals: FfiTotals,
    pub completed_at: String,
}

impl From<TransactionReceipt> for FfiReceipt {
    fn from(receipt: TransactionReceipt) -> Self {
        Self {
            receipt_id: receipt.receipt_id,
            customer_name: receipt.customer_name,
            lines: receipt
                .lines
                .into_iter()
                .map(|line| FfiReceiptLine {
                    med_name: line.med_name,
                    batch_id: line.batch_id,
                    quantity: line.quantity,
                    price: line.price.to_string(),
                })
                .collect(),
            totals: receipt.totals.into(),
            completed_at: receipt.completed_at,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStockEntry {
    pub med_name: String,
    pub batch_id: String,
    pub expiry_date: String,
    pub quantity: u32,
    pub cost_price: String,
}

impl TryFrom<FfiStockEntry> for NewStockEntry {
    type Error = PharmacyOpsError;

    fn try_from(entry: FfiStockEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            med_name: entry.med_name,
            batch_id: entry.batch_id,
            expiry_date: entry.expiry_date,
            quantity: entry.quantity,
            cost_price: parse_money(&entry.cost_price)?,
        })
    }
}
