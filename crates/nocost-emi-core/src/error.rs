use thiserror::Error;

use crate::types::Months;

#[derive(Debug, Error)]
pub enum EmiError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown bank: {0}")]
    UnknownBank(String),

    #[error("{bank} offers no EMI plan for {tenure_months} months (available: {available:?})")]
    UnsupportedTenure {
        bank: String,
        tenure_months: Months,
        available: Vec<Months>,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for EmiError {
    fn from(e: serde_json::Error) -> Self {
        EmiError::SerializationError(e.to_string())
    }
}
