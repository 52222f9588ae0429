//! Inventory and receipt exports.

mod inventory;
mod receipt;

pub use inventory::*;
pub use receipt::*;

/// Quote a CSV field when it holds a delimiter, quote or line break.
pub(crate) fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
