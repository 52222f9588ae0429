//! Receipt export for a completed sale.

use serde::{Deserialize, Serialize};

use crate::models::TransactionReceipt;

use super::escape_csv;

/// A receipt ready to print or hand to another system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptExport {
    pub receipt: TransactionReceipt,
}

impl ReceiptExport {
    pub fn new(receipt: TransactionReceipt) -> Self {
        Self { receipt }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.receipt)
    }

    /// One row per line followed by the totals.
    pub fn to_csv(&self) -> String {
        let receipt = &self.receipt;
        let customer = receipt.customer_name.as_deref().unwrap_or("");
        let mut csv = String::from("receipt_id,customer_name,med_name,batch_id,quantity,price,line_total\n");

        for line in &receipt.lines {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                escape_csv(&receipt.receipt_id),
                escape_csv(customer),
                escape_csv(&line.med_name),
                escape_csv(&line.batch_id),
                line.quantity,
                line.price,
                line.price * rust_decimal::Decimal::from(line.quantity),
            ));
        }

        for (label, amount) in [
            ("subtotal", receipt.totals.subtotal),
            ("tax", receipt.totals.tax),
            ("total", receipt.totals.total),
        ] {
            csv.push_str(&format!(
                "{},{},{},,,,{}\n",
                escape_csv(&receipt.receipt_id),
                escape_csv(customer),
                label,
                amount
            ));
        }

        csv
    }
}
