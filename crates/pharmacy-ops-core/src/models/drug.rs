//! Drug database records.

use serde::{Deserialize, Serialize};

/// One row of the reference drug database (`GET /drugs`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DrugRecord {
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub generic_name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub dosage_form: String,
    #[serde(default)]
    pub primary_ingredient: String,
}
