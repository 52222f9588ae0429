//! Inventory export of a filtered and sorted view.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inventory::{derive_expiry_status, derive_stock_status, InventoryView};
use crate::models::InventoryItem;

use super::escape_csv;

const CSV_HEADER: &str = "id,drug_name,quantity,expiry_date,expiry_status,stock_status,batch_number,manufacturer,category,unit_price,is_outbreak\n";

/// Export of every row matching a view, not just the displayed ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryExport {
    /// Export timestamp
    pub exported_at: String,
    /// Date statuses were derived against
    pub as_of: NaiveDate,
    /// Row count
    pub total_items: usize,
    pub rows: Vec<InventoryExportRow>,
}

/// One exported item with its derived statuses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryExportRow {
    pub id: String,
    pub drug_name: String,
    pub quantity: u32,
    pub expiry_date: String,
    pub expiry_status: String,
    pub days_remaining: Option<i64>,
    pub stock_status: String,
    pub batch_number: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub unit_price: Option<Decimal>,
    pub is_outbreak: bool,
}

impl InventoryExportRow {
    fn from_item(item: &InventoryItem, today: NaiveDate) -> Self {
        let expiry = derive_expiry_status(&item.expiry_date, today);
        Self {
            id: item.id.clone(),
            drug_name: item.drug_name.clone(),
            quantity: item.quantity,
            expiry_date: item.expiry_date.clone(),
            expiry_status: expiry.status.as_str().to_string(),
            days_remaining: expiry.days_remaining,
            stock_status: derive_stock_status(item.quantity).label().to_string(),
            batch_number: item.batch_number.clone(),
            manufacturer: item.manufacturer.clone(),
            category: item.category.clone(),
            unit_price: item.unit_price,
            is_outbreak: item.is_outbreak,
        }
    }
}

impl InventoryExport {
    /// Export the full result of a view.
    pub fn from_view(view: &InventoryView, today: NaiveDate) -> Self {
        Self::from_items(view.rows(), today)
    }

    pub fn from_items(items: &[InventoryItem], today: NaiveDate) -> Self {
        let rows: Vec<_> = items
            .iter()
            .map(|item| InventoryExportRow::from_item(item, today))
            .collect();

        Self {
            exported_at: Utc::now().to_rfc3339(),
            as_of: today,
            total_items: rows.len(),
            rows,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);

        for row in &self.rows {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{}\n",
                escape_csv(&row.id),
                escape_csv(&row.drug_name),
                row.quantity,
                escape_csv(&row.expiry_date),
                row.expiry_status,
                escape_csv(&row.stock_status),
                escape_csv(row.batch_number.as_deref().unwrap_or("")),
                escape_csv(row.manufacturer.as_deref().unwrap_or("")),
                escape_csv(row.category.as_deref().unwrap_or("")),
                row.unit_price.map(|p| p.to_string()).unwrap_or_default(),
                row.is_outbreak,
            ));
        }

        csv
    }
}
