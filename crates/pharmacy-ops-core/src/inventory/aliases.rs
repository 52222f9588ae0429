//! Field-name aliases for backend inventory rows.
//!
//! Datasets behind `GET /inventory` do not agree on column names. Each
//! canonical column lists its accepted aliases in priority order; the first
//! alias holding a usable value wins, otherwise the default applies.
//!
//! What counts as usable depends on the column. `quantity` only skips
//! missing or null values, so an empty string or `0` is kept as is. The
//! other columns also skip empty strings, `0` and `false`.
//!
//! | column            | aliases                      | skips        | default     |
//! |-------------------|------------------------------|--------------|-------------|
//! | `med_name`        | `med_name`, `SKU_ID`         | blank        | `""`        |
//! | `quantity`        | `quantity`, `Qty_On_Hand`    | missing      | `"0"`       |
//! | `expiry_date`     | `expiry_date`, `Expiry_Date` | blank        | `""`        |
//! | `batch_id`        | `batch_id`, `Batch_ID`       | blank        | `"-"`       |
//! | `status`          | `status`                     | blank        | `"Unknown"` |
//! | `is_outbreak_col` | `is_outbreak`                | blank        | `"false"`   |

use serde_json::Value;

use crate::models::{FieldMapping, RawRow};

/// Which values make the resolver move on to the next alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// Absent or null.
    Missing,
    /// Absent, null, empty string, zero or `false`.
    Blank,
}

/// Accepted source names for one canonical column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnAlias {
    pub column: &'static str,
    pub aliases: &'static [&'static str],
    pub skip: Skip,
    pub default: &'static str,
}

/// The alias table, in column order.
pub const INVENTORY_ALIASES: &[ColumnAlias] = &[
    ColumnAlias { column: "med_name", aliases: &["med_name", "SKU_ID"], skip: Skip::Blank, default: "" },
    ColumnAlias { column: "quantity", aliases: &["quantity", "Qty_On_Hand"], skip: Skip::Missing, default: "0" },
    ColumnAlias { column: "expiry_date", aliases: &["expiry_date", "Expiry_Date"], skip: Skip::Blank, default: "" },
    ColumnAlias { column: "batch_id", aliases: &["batch_id", "Batch_ID"], skip: Skip::Blank, default: "-" },
    ColumnAlias { column: "status", aliases: &["status"], skip: Skip::Blank, default: "Unknown" },
    ColumnAlias { column: "is_outbreak_col", aliases: &["is_outbreak"], skip: Skip::Blank, default: "false" },
];

/// Mapping from the canonical columns onto logical fields.
pub fn api_mapping() -> FieldMapping {
    let mut mapping = FieldMapping::new("med_name", "quantity", "expiry_date");
    mapping.batch_number = Some("batch_id".into());
    mapping.category = Some("status".into());
    mapping.is_outbreak = Some("is_outbreak_col".into());
    mapping
}

/// Resolve one backend JSON row into a canonical string row.
pub fn resolve_api_row(value: &Value) -> RawRow {
    INVENTORY_ALIASES
        .iter()
        .map(|alias| {
            let resolved = alias
                .aliases
                .iter()
                .find_map(|name| value.get(name).and_then(|v| scalar_text(v, alias.skip)))
                .unwrap_or_else(|| alias.default.to_string());
            (alias.column.to_string(), resolved)
        })
        .collect()
}

/// Resolve a list of backend rows.
pub fn resolve_api_rows(values: &[Value]) -> Vec<RawRow> {
    values.iter().map(resolve_api_row).collect()
}

/// Usable text of a scalar JSON value. Null and containers are never usable.
fn scalar_text(value: &Value, skip: Skip) -> Option<String> {
    let blank = match value {
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(b) => !b,
    };
    if blank && skip == Skip::Blank {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
