use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use annuity_core::amortization::{self, LoanParams};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortisation
// ---------------------------------------------------------------------------

/// Full simulation envelope for a JSON-encoded `LoanParams`.
#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let input: LoanParams = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::calculate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// The simulation a page shows before the user submits anything.
#[napi]
pub fn default_simulation() -> NapiResult<String> {
    let output = amortization::default_simulation().map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn remaining_balance(input_json: String, after_period: u32) -> NapiResult<String> {
    let input: LoanParams = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let balance = amortization::remaining_balance(&input, after_period).map_err(to_napi_error)?;
    Ok(balance.to_string())
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// `amount` is a decimal string so no precision is lost crossing into JS.
#[napi]
pub fn format_currency(amount: String) -> NapiResult<String> {
    let amount: Decimal = amount.trim().parse().map_err(to_napi_error)?;
    Ok(annuity_core::format_currency(amount))
}
