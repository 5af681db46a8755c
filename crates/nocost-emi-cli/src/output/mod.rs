pub mod csv_out;
pub mod currency;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Column order for row exports: schedule lines, then sweep points, then issuers.
const COLUMN_ORDER: &[&str] = &[
    "month",
    "installment",
    "principal_component",
    "interest_component",
    "tax_on_interest",
    "fee_charged",
    "fee_tax",
    "total_outflow",
    "remaining_balance",
    "annual_interest_rate",
    "tenure_months",
    "monthly_installment",
    "discount_applied",
    "total_interest",
    "total_hidden_cost",
    "effective_price",
    "name",
    "processing_fee",
    "tenures",
    "rates_pct",
    "rate_for_tenure",
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Headers for a row collection. Known columns come first in reading order;
/// any others follow in key order.
pub fn ordered_headers(first: &Map<String, Value>) -> Vec<&str> {
    let mut headers: Vec<&str> = COLUMN_ORDER
        .iter()
        .copied()
        .filter(|key| first.contains_key(*key))
        .collect();
    headers.extend(
        first
            .keys()
            .map(String::as_str)
            .filter(|key| !COLUMN_ORDER.contains(key)),
    );
    headers
}
