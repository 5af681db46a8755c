pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "no_cost_emi")]
pub mod no_cost_emi;

#[cfg(feature = "bank_presets")]
pub mod bank_presets;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

pub use error::EmiError;
pub use types::*;

/// Standard result type for all No Cost EMI operations
pub type EmiResult<T> = Result<T, EmiError>;
