//! Sorted, filtered inventory views.
//!
//! The default view is First-Expiry-First-Out: soonest expiry first, so
//! stock about to expire is sold or moved before it is wasted.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dates::parse_expiry;
use crate::models::{DrugRecord, InventoryItem};

/// Rows shown before the "showing N of M" indicator kicks in.
pub const DEFAULT_DISPLAY_CAP: usize = 50;

/// Column to sort by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Expiry,
    Name,
    Quantity,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Apply the direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Current sort selection. Defaults to expiry ascending (FEFO).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Column-header click: same column flips the order, a new column starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.order = self.order.flipped();
        } else {
            self.key = key;
            self.order = SortOrder::Asc;
        }
    }
}

/// Item fields the search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchField {
    DrugName,
    Manufacturer,
    Category,
    BatchNumber,
}

impl MatchField {
    fn value(self, item: &InventoryItem) -> Option<&str> {
        match self {
            MatchField::DrugName => Some(item.drug_name.as_str()),
            MatchField::Manufacturer => item.manufacturer.as_deref(),
            MatchField::Category => item.category.as_deref(),
            MatchField::BatchNumber => item.batch_number.as_deref(),
        }
    }
}

/// Everything that shapes a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewQuery {
    pub sort: SortState,
    pub search: String,
    pub match_fields: Vec<MatchField>,
    pub display_cap: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            sort: SortState::default(),
            search: String::new(),
            match_fields: vec![MatchField::DrugName],
            display_cap: DEFAULT_DISPLAY_CAP,
        }
    }
}

/// Filtered and sorted rows.
///
/// The full result is kept for counts and export; the display cap only
/// affects [`InventoryView::visible`].
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryView {
    rows: Vec<InventoryItem>,
    display_cap: usize,
}

impl InventoryView {
    /// All matching rows in sorted order.
    pub fn rows(&self) -> &[InventoryItem] {
        &self.rows
    }

    /// Rows to render.
    pub fn visible(&self) -> &[InventoryItem] {
        &self.rows[..self.rows.len().min(self.display_cap)]
    }

    /// Number of matching rows.
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn is_truncated(&self) -> bool {
        self.rows.len() > self.display_cap
    }

    /// "Showing 50 of 120 items", only when rows were cut.
    pub fn showing_label(&self) -> Option<String> {
        self.is_truncated()
            .then(|| format!("Showing {} of {} items", self.display_cap, self.rows.len()))
    }

    pub fn into_rows(self) -> Vec<InventoryItem> {
        self.rows
    }
}

/// Build a view with the default display cap.
pub fn sort_and_filter(
    items: &[InventoryItem],
    sort: SortState,
    search: &str,
    fields: &[MatchField],
) -> InventoryView {
    build_view(
        items,
        &ViewQuery {
            sort,
            search: search.to_string(),
            match_fields: fields.to_vec(),
            display_cap: DEFAULT_DISPLAY_CAP,
        },
    )
}

/// Build a view for a query.
pub fn build_view(items: &[InventoryItem], query: &ViewQuery) -> InventoryView {
    let mut rows = filter_items(items, &query.search, &query.match_fields);
    sort_items(&mut rows, query.sort);

    debug!(
        input = items.len(),
        matched = rows.len(),
        key = ?query.sort.key,
        order = ?query.sort.order,
        "built inventory view"
    );

    InventoryView {
        rows,
        display_cap: query.display_cap,
    }
}

/// Case-insensitive substring filter. An empty term keeps everything.
pub fn filter_items(items: &[InventoryItem], search: &str, fields: &[MatchField]) -> Vec<InventoryItem> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| {
            fields.iter().any(|field| {
                field
                    .value(item)
                    .is_some_and(|v| v.to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect()
}

/// Stable sort in place.
///
/// Under [`SortKey::Expiry`], rows whose date does not parse keep their
/// positions; the dated rows are ordered among the remaining slots.
pub fn sort_items(items: &mut Vec<InventoryItem>, sort: SortState) {
    match sort.key {
        SortKey::Expiry => sort_by_expiry(items, sort.order),
        SortKey::Name => {
            items.sort_by(|a, b| sort.order.apply(compare_names(&a.drug_name, &b.drug_name)))
        }
        SortKey::Quantity => items.sort_by(|a, b| sort.order.apply(a.quantity.cmp(&b.quantity))),
    }
}

fn sort_by_expiry(items: &mut Vec<InventoryItem>, order: SortOrder) {
    let dated: Vec<(usize, NaiveDate)> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| parse_expiry(&item.expiry_date).map(|d| (i, d)))
        .collect();

    let mut ordered = dated.clone();
    ordered.sort_by(|a, b| order.apply(a.1.cmp(&b.1)));

    // placement[slot] = index of the row that ends up in that slot
    let mut placement: Vec<usize> = (0..items.len()).collect();
    for ((slot, _), (source, _)) in dated.iter().zip(&ordered) {
        placement[*slot] = *source;
    }

    let mut pool: Vec<Option<InventoryItem>> = std::mem::take(items).into_iter().map(Some).collect();
    *items = placement
        .into_iter()
        .filter_map(|source| pool[source].take())
        .collect();
}

/// Case-insensitive name order; on a tie lowercase sorts before uppercase.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Filter drug-database records by brand, generic or manufacturer name.
pub fn filter_drug_records(records: &[DrugRecord], search: &str) -> Vec<DrugRecord> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| {
            [&r.brand_name, &r.generic_name, &r.manufacturer]
                .iter()
                .any(|v| v.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
