use rust_decimal::Decimal;

use super::schedule::{constant_annuity, validate_params, LoanParams};
use crate::error::AnnuityError;
use crate::time_value;
use crate::types::Money;
use crate::AnnuityResult;

/// Outstanding principal once `after_period` instalments have been paid,
/// valued as the present value of the instalments still due.
pub fn remaining_balance(params: &LoanParams, after_period: u32) -> AnnuityResult<Money> {
    validate_params(params)?;
    if after_period > params.duration {
        return Err(AnnuityError::invalid(
            "after_period",
            format!(
                "Period {after_period} is beyond the loan duration of {}",
                params.duration
            ),
        ));
    }
    if after_period == 0 {
        return Ok(params.capital);
    }

    let remaining = params.duration - after_period;
    if remaining == 0 {
        return Ok(Decimal::ZERO);
    }

    let annuity = constant_annuity(params)?;
    time_value::pv(params.periodic_rate(), remaining, -annuity, Decimal::ZERO)
}
