//! Expiry alert payload, the source of the billing screen's available batches.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::batch::Batch;

/// Response of `GET /expiry/alerts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpiryAlerts {
    #[serde(default)]
    pub kpi: Option<ExpiryKpi>,
    #[serde(default)]
    pub drugs: Vec<DrugAlert>,
}

/// Headline figures of the expiry dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpiryKpi {
    #[serde(default)]
    pub critical_items: u32,
    #[serde(default)]
    pub value_at_risk: f64,
    #[serde(default)]
    pub potential_recovery: f64,
    #[serde(default)]
    pub items_monitored: u32,
}

/// All batches of one drug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugAlert {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub batches: Vec<BatchAlert>,
}

/// One batch as reported by the alerts endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchAlert {
    pub id: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub days_left: i64,
    #[serde(default)]
    pub qty: i64,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl ExpiryAlerts {
    /// Flatten into the billing engine's available-batch list.
    ///
    /// Only batches with stock on hand are eligible; order follows the
    /// payload (drug order, then batch order).
    pub fn available_batches(&self) -> Vec<Batch> {
        self.drugs
            .iter()
            .flat_map(|drug| {
                drug.batches
                    .iter()
                    .filter(|batch| batch.qty > 0)
                    .map(move |batch| Batch {
                        med_name: drug.name.clone(),
                        batch_id: batch.id.clone(),
                        expiry_date: batch.expiry.clone(),
                        quantity: u32::try_from(batch.qty).unwrap_or(u32::MAX),
                        price: batch.price,
                        days_left: batch.days_left,
                    })
            })
            .collect()
    }
}
