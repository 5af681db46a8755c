use napi::Result as NapiResult;
use napi_derive::napi;

use nocost_emi_core::bank_presets::presets::{BankPresets, BankRequestInput};
use nocost_emi_core::no_cost_emi::report::{self, LoanRequest};
use nocost_emi_core::sensitivity::sweep::{self, SensitivityInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Hidden-cost report
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_no_cost_emi(input_json: String) -> NapiResult<String> {
    let input: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::analyze_no_cost_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_sensitivity(input_json: String) -> NapiResult<String> {
    let input: SensitivityInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sweep::analyze_sensitivity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Bank presets
// ---------------------------------------------------------------------------

#[napi]
pub fn bank_presets() -> NapiResult<String> {
    let presets = BankPresets::embedded().map_err(to_napi_error)?;
    serde_json::to_string(&presets).map_err(to_napi_error)
}

/// Resolve a bank-relative request into a plain LoanRequest, for forms that
/// auto-fill rate and fee when the issuer or tenure changes.
#[napi]
pub fn bank_request(input_json: String) -> NapiResult<String> {
    let input: BankRequestInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let presets = BankPresets::embedded().map_err(to_napi_error)?;
    let request = presets.resolve(&input).map_err(to_napi_error)?;
    serde_json::to_string(&request).map_err(to_napi_error)
}
