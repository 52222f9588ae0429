//! Raw row normalizer.
//!
//! Coerces string-keyed rows into [`InventoryItem`]s:
//! - Missing drug names default to "Unknown"
//! - Quantities take the leading integer of the cell, 0 when there is none
//! - Prices take the leading decimal number, absent when there is none
//!
//! Rows are never rejected; a malformed cell only degrades its own field.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{FieldMapping, InventoryItem, LogicalField, RawRow};

/// Fallback drug name for rows without one.
pub const UNKNOWN_DRUG_NAME: &str = "Unknown";

/// Normalizer bound to one confirmed field mapping.
pub struct InventoryNormalizer {
    mapping: FieldMapping,
}

impl InventoryNormalizer {
    /// Create a normalizer for a mapping.
    pub fn new(mapping: FieldMapping) -> Self {
        Self { mapping }
    }

    /// The mapping in use.
    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Normalize every row, preserving order. Ids are row positions.
    pub fn normalize(&self, rows: &[RawRow]) -> Vec<InventoryItem> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| self.normalize_row(index, row))
            .collect()
    }

    /// Normalize a single row at a given position.
    pub fn normalize_row(&self, index: usize, row: &RawRow) -> InventoryItem {
        let drug_name = self
            .cell(row, LogicalField::DrugName)
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN_DRUG_NAME)
            .to_string();

        let quantity = self
            .cell(row, LogicalField::Quantity)
            .map(parse_quantity)
            .unwrap_or(0);

        let expiry_date = self
            .cell(row, LogicalField::ExpiryDate)
            .unwrap_or_default()
            .to_string();

        InventoryItem {
            id: index.to_string(),
            drug_name,
            quantity,
            expiry_date,
            batch_number: self.optional_text(row, LogicalField::BatchNumber),
            manufacturer: self.optional_text(row, LogicalField::Manufacturer),
            unit_price: self.cell(row, LogicalField::UnitPrice).and_then(parse_price),
            category: self.optional_text(row, LogicalField::Category),
            is_outbreak: self.cell(row, LogicalField::IsOutbreak) == Some("true"),
        }
    }

    fn cell<'r>(&self, row: &'r RawRow, field: LogicalField) -> Option<&'r str> {
        let column = self.mapping.column(field)?;
        row.get(column).map(String::as_str)
    }

    fn optional_text(&self, row: &RawRow, field: LogicalField) -> Option<String> {
        self.cell(row, field).map(str::to_string)
    }
}

/// Normalize rows with a mapping.
pub fn normalize(rows: &[RawRow], mapping: &FieldMapping) -> Vec<InventoryItem> {
    InventoryNormalizer::new(mapping.clone()).normalize(rows)
}

/// Leading integer of a cell, clamped to `0..=u32::MAX`.
///
/// `"12 boxes"` → 12, `"7.9"` → 7, `"-3"` → 0, `"n/a"` → 0.
pub fn parse_quantity(raw: &str) -> u32 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 || negative {
        return 0;
    }

    digits[..end].parse::<u32>().unwrap_or(u32::MAX)
}

/// Leading decimal number of a cell, `None` when there is none.
///
/// `"12.50"` → 12.50, `"3.2 EUR"` → 3.2, `"1.5e2"` → 150, `"free"` → `None`.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digit_count = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digit_count += frac_end - frac_start;
        end = frac_end;
    }
    if digit_count == 0 {
        return None;
    }

    let mut mantissa = s[..end].trim_end_matches('.').to_string();
    let sign_len = mantissa.len() - mantissa.trim_start_matches(['-', '+']).len();
    if mantissa[sign_len..].starts_with('.') {
        mantissa.insert(sign_len, '0');
    }

    // Optional exponent, only when followed by digits
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            let scientific = format!("{}{}", mantissa, &s[end..exp_end]);
            return Decimal::from_scientific(&scientific).ok();
        }
    }

    Decimal::from_str(&mantissa).ok()
}
