//! Expiry and stock status classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::{days_between, parse_expiry};

/// Days remaining at or below which stock is critical.
pub const CRITICAL_WINDOW_DAYS: i64 = 30;
/// Days remaining at or below which stock needs attention.
pub const WARNING_WINDOW_DAYS: i64 = 90;
/// Quantities below this are low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 50;

/// Expiry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryLevel {
    Expired,
    Critical,
    Warning,
    Ok,
    Unknown,
}

impl ExpiryLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpiryLevel::Expired => "expired",
            ExpiryLevel::Critical => "critical",
            ExpiryLevel::Warning => "warning",
            ExpiryLevel::Ok => "ok",
            ExpiryLevel::Unknown => "unknown",
        }
    }
}

/// Derived expiry status of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryStatus {
    pub status: ExpiryLevel,
    /// Calendar days until expiry; `None` when the date is missing or invalid
    pub days_remaining: Option<i64>,
    pub label: String,
}

impl ExpiryStatus {
    fn unknown(label: &str) -> Self {
        Self {
            status: ExpiryLevel::Unknown,
            days_remaining: None,
            label: label.to_string(),
        }
    }
}

/// Classify an expiry date string relative to `today`.
pub fn derive_expiry_status(date_str: &str, today: NaiveDate) -> ExpiryStatus {
    if date_str.trim().is_empty() {
        return ExpiryStatus::unknown("No Date");
    }

    let Some(date) = parse_expiry(date_str) else {
        return ExpiryStatus::unknown("Invalid Date");
    };

    let days = days_between(date, today);
    let (status, label) = if days < 0 {
        (ExpiryLevel::Expired, "Expired".to_string())
    } else if days <= CRITICAL_WINDOW_DAYS {
        (ExpiryLevel::Critical, format!("{}d", days))
    } else if days <= WARNING_WINDOW_DAYS {
        (ExpiryLevel::Warning, format!("{}d", days))
    } else {
        (ExpiryLevel::Ok, format!("{}d", days))
    };

    ExpiryStatus {
        status,
        days_remaining: Some(days),
        label,
    }
}

/// Stock level classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }

    /// Whether the quantity deserves a warning marker.
    pub fn needs_attention(self) -> bool {
        !matches!(self, StockStatus::InStock)
    }
}

/// Classify a quantity on hand.
pub fn derive_stock_status(quantity: u32) -> StockStatus {
    if quantity == 0 {
        StockStatus::OutOfStock
    } else if quantity < LOW_STOCK_THRESHOLD {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_expiry_classification() {
        let expired = derive_expiry_status("2023-12-01", today());
        assert_eq!(expired.status, ExpiryLevel::Expired);
        assert_eq!(expired.label, "Expired");
        assert_eq!(expired.days_remaining, Some(-31));

        let critical = derive_expiry_status("2024-01-15", today());
        assert_eq!(critical.status, ExpiryLevel::Critical);
        assert_eq!(critical.label, "14d");

        let warning = derive_expiry_status("2024-03-01", today());
        assert_eq!(warning.status, ExpiryLevel::Warning);
        assert_eq!(warning.label, "60d");

        let ok = derive_expiry_status("2025-01-01", today());
        assert_eq!(ok.status, ExpiryLevel::Ok);
        assert_eq!(ok.label, "366d");
    }

    #[test]
    fn test_window_boundaries() {
        assert_eq!(derive_expiry_status("2024-01-01", today()).status, ExpiryLevel::Critical);
        assert_eq!(derive_expiry_status("2024-01-31", today()).status, ExpiryLevel::Critical);
        assert_eq!(derive_expiry_status("2024-02-01", today()).status, ExpiryLevel::Warning);
        assert_eq!(derive_expiry_status("2024-03-31", today()).status, ExpiryLevel::Warning);
        assert_eq!(derive_expiry_status("2024-04-01", today()).status, ExpiryLevel::Ok);
    }

    #[test]
    fn test_missing_and_invalid_dates() {
        let missing = derive_expiry_status("", today());
        assert_eq!(missing.status, ExpiryLevel::Unknown);
        assert_eq!(missing.label, "No Date");
        assert_eq!(missing.days_remaining, None);

        let invalid = derive_expiry_status("soon", today());
        assert_eq!(invalid.status, ExpiryLevel::Unknown);
        assert_eq!(invalid.label, "Invalid Date");
        assert_eq!(invalid.days_remaining, None);
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(derive_stock_status(0), StockStatus::OutOfStock);
        assert_eq!(derive_stock_status(1), StockStatus::LowStock);
        assert_eq!(derive_stock_status(49), StockStatus::LowStock);
        assert_eq!(derive_stock_status(50), StockStatus::InStock);
        assert_eq!(derive_stock_status(0).label(), "Out of Stock");
        assert!(derive_stock_status(10).needs_attention());
        assert!(!derive_stock_status(500).needs_attention());
    }
}
