//! Inventory models derived from raw stock rows.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A raw stock row: column name → cell value, all values already strings.
pub type RawRow = HashMap<String, String>;

/// A typed inventory record derived from one raw row and a field mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    /// Positional identifier (row index as string)
    pub id: String,
    /// Drug name, "Unknown" when the source cell is missing
    pub drug_name: String,
    /// Units on hand, 0 when the source cell does not parse
    pub quantity: u32,
    /// Expiry date exactly as received
    pub expiry_date: String,
    /// Batch number (only when mapped)
    pub batch_number: Option<String>,
    /// Manufacturer (only when mapped)
    pub manufacturer: Option<String>,
    /// Unit price (absent when unmapped or unparseable)
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub unit_price: Option<Decimal>,
    /// Category (only when mapped)
    pub category: Option<String>,
    /// Flagged as affected by a disease outbreak
    pub is_outbreak: bool,
}

impl InventoryItem {
    /// Create an item with only the mandatory fields set.
    pub fn new(id: impl Into<String>, drug_name: impl Into<String>, quantity: u32, expiry_date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            drug_name: drug_name.into(),
            quantity,
            expiry_date: expiry_date.into(),
            batch_number: None,
            manufacturer: None,
            unit_price: None,
            category: None,
            is_outbreak: false,
        }
    }
}

/// Logical inventory fields a source column can be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogicalField {
    DrugName,
    Quantity,
    ExpiryDate,
    BatchNumber,
    Manufacturer,
    UnitPrice,
    Category,
    IsOutbreak,
}

impl LogicalField {
    /// All fields, in the order they are presented for mapping.
    pub const ALL: [LogicalField; 8] = [
        LogicalField::DrugName,
        LogicalField::Quantity,
        LogicalField::ExpiryDate,
        LogicalField::BatchNumber,
        LogicalField::Manufacturer,
        LogicalField::UnitPrice,
        LogicalField::Category,
        LogicalField::IsOutbreak,
    ];

    /// Stable key used in mapping documents (e.g. "drugName").
    pub fn key(self) -> &'static str {
        match self {
            LogicalField::DrugName => "drugName",
            LogicalField::Quantity => "quantity",
            LogicalField::ExpiryDate => "expiryDate",
            LogicalField::BatchNumber => "batchNumber",
            LogicalField::Manufacturer => "manufacturer",
            LogicalField::UnitPrice => "unitPrice",
            LogicalField::Category => "category",
            LogicalField::IsOutbreak => "isOutbreak",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            LogicalField::DrugName => "Drug Name",
            LogicalField::Quantity => "Quantity",
            LogicalField::ExpiryDate => "Expiry Date",
            LogicalField::BatchNumber => "Batch Number",
            LogicalField::Manufacturer => "Manufacturer",
            LogicalField::UnitPrice => "Unit Price",
            LogicalField::Category => "Category",
            LogicalField::IsOutbreak => "Outbreak Flag",
        }
    }

    /// Whether a mapping must name a column for this field.
    pub fn is_required(self) -> bool {
        matches!(
            self,
            LogicalField::DrugName | LogicalField::Quantity | LogicalField::ExpiryDate
        )
    }

    /// Look up a field by its key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Confirmed logical-field → column-name mapping.
///
/// The three mandatory columns are plain strings, so a mapping with a
/// required field unset cannot be constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldMapping {
    pub drug_name: String,
    pub quantity: String,
    pub expiry_date: String,
    pub batch_number: Option<String>,
    pub manufacturer: Option<String>,
    pub unit_price: Option<String>,
    pub category: Option<String>,
    pub is_outbreak: Option<String>,
}

impl FieldMapping {
    /// Create a mapping with only the mandatory columns.
    pub fn new(drug_name: impl Into<String>, quantity: impl Into<String>, expiry_date: impl Into<String>) -> Self {
        Self {
            drug_name: drug_name.into(),
            quantity: quantity.into(),
            expiry_date: expiry_date.into(),
            batch_number: None,
            manufacturer: None,
            unit_price: None,
            category: None,
            is_outbreak: None,
        }
    }

    /// Column mapped to a field. Empty column names count as unmapped.
    pub fn column(&self, field: LogicalField) -> Option<&str> {
        let column = match field {
            LogicalField::DrugName => Some(self.drug_name.as_str()),
            LogicalField::Quantity => Some(self.quantity.as_str()),
            LogicalField::ExpiryDate => Some(self.expiry_date.as_str()),
            LogicalField::BatchNumber => self.batch_number.as_deref(),
            LogicalField::Manufacturer => self.manufacturer.as_deref(),
            LogicalField::UnitPrice => self.unit_price.as_deref(),
            LogicalField::Category => self.category.as_deref(),
            LogicalField::IsOutbreak => self.is_outbreak.as_deref(),
        };
        column.filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let required: Vec<_> = LogicalField::ALL
            .into_iter()
            .filter(|f| f.is_required())
            .collect();
        assert_eq!(
            required,
            vec![
                LogicalField::DrugName,
                LogicalField::Quantity,
                LogicalField::ExpiryDate
            ]
        );
    }

    #[test]
    fn test_field_key_roundtrip() {
        for field in LogicalField::ALL {
            assert_eq!(LogicalField::from_key(field.key()), Some(field));
        }
        assert_eq!(LogicalField::from_key("nope"), None);
    }

    #[test]
    fn test_empty_optional_column_is_unmapped() {
        let mut mapping = FieldMapping::new("name", "qty", "exp");
        mapping.category = Some(String::new());
        mapping.batch_number = Some("batch".into());

        assert_eq!(mapping.column(LogicalField::Category), None);
        assert_eq!(mapping.column(LogicalField::BatchNumber), Some("batch"));
        assert_eq!(mapping.column(LogicalField::DrugName), Some("name"));
    }
}
