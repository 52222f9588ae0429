//! Column mapping for uploaded stock files.
//!
//! An upload goes through two steps: [`auto_map`] guesses a column for each
//! logical field from the header names, then the user adjusts the draft and
//! [`MappingDraft::confirm`] turns it into a [`FieldMapping`]. Confirmation
//! is all-or-nothing.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{FieldMapping, LogicalField};

/// Mapping errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Please map all required fields: {}", join_keys(.0))]
    MissingRequired(Vec<LogicalField>),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

pub type MappingResult<T> = Result<T, MappingError>;

fn join_keys(fields: &[LogicalField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A mapping under construction, tied to the headers of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingDraft {
    headers: Vec<String>,
    columns: BTreeMap<LogicalField, String>,
}

impl MappingDraft {
    /// Empty draft for a set of headers.
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            columns: BTreeMap::new(),
        }
    }

    /// Headers the draft can choose from.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Column currently chosen for a field.
    pub fn get(&self, field: LogicalField) -> Option<&str> {
        self.columns.get(&field).map(String::as_str)
    }

    /// All current choices, in field order.
    pub fn columns(&self) -> &BTreeMap<LogicalField, String> {
        &self.columns
    }

    /// Choose a column for a field.
    pub fn set(&mut self, field: LogicalField, column: &str) -> MappingResult<()> {
        if !self.headers.iter().any(|h| h == column) {
            return Err(MappingError::UnknownColumn(column.to_string()));
        }
        self.columns.insert(field, column.to_string());
        Ok(())
    }

    /// Unset a field.
    pub fn clear(&mut self, field: LogicalField) {
        self.columns.remove(&field);
    }

    /// Required fields that still have no column.
    pub fn missing_required(&self) -> Vec<LogicalField> {
        LogicalField::ALL
            .into_iter()
            .filter(|f| f.is_required() && !self.columns.contains_key(f))
            .collect()
    }

    /// Validate and produce the final mapping.
    pub fn confirm(&self) -> MappingResult<FieldMapping> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(MappingError::MissingRequired(missing));
        }

        let column = |field| self.columns.get(&field).cloned();
        let required = |field| column(field).unwrap_or_default();

        Ok(FieldMapping {
            drug_name: required(LogicalField::DrugName),
            quantity: required(LogicalField::Quantity),
            expiry_date: required(LogicalField::ExpiryDate),
            batch_number: column(LogicalField::BatchNumber),
            manufacturer: column(LogicalField::Manufacturer),
            unit_price: column(LogicalField::UnitPrice),
            category: column(LogicalField::Category),
            is_outbreak: column(LogicalField::IsOutbreak),
        })
    }
}

/// A logical field as shown in the mapping dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemField {
    pub field: LogicalField,
    pub label: &'static str,
    pub required: bool,
}

/// Logical fields in dialog order.
pub fn system_fields() -> Vec<SystemField> {
    LogicalField::ALL
        .iter()
        .map(|&field| SystemField {
            field,
            label: field.label(),
            required: field.is_required(),
        })
        .collect()
}

/// Guess a column for every logical field from the header names.
///
/// A header matches when its lowercase form contains the field key
/// (`expirydate`) or the label with its first space removed.
pub fn auto_map(headers: &[String]) -> MappingDraft {
    let mut draft = MappingDraft::new(headers.to_vec());

    for field in LogicalField::ALL {
        let key = field.key().to_lowercase();
        let label = field.label().to_lowercase().replacen(' ', "", 1);

        let matched = headers.iter().find(|h| {
            let header = h.to_lowercase();
            header.contains(&key) || header.contains(&label)
        });

        if let Some(header) = matched {
            debug!(field = field.key(), column = %header, "auto-mapped column");
            draft.columns.insert(field, header.clone());
        }
    }

    draft
}
