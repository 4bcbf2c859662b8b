use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::AnnuityError;
use crate::types::{Money, Rate};
use crate::AnnuityResult;

/// `(1 + rate)^nper`, computed by repeated multiplication so the schedule
/// never depends on a logarithmic `powd` approximation.
fn compound_factor(rate: Rate, nper: u32) -> AnnuityResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| AnnuityError::overflow(format!("compound factor (1 + {rate})^{nper}")))
}

/// Net Present Value of a series of cash flows, the first one undiscounted
pub fn npv(rate: Rate, cash_flows: &[Money]) -> AnnuityResult<Money> {
    if rate <= dec!(-1) {
        return Err(AnnuityError::invalid(
            "rate",
            "Discount rate must be greater than -100%",
        ));
    }

    let mut result = Decimal::ZERO;
    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount = discount
                .checked_mul(one_plus_r)
                .ok_or_else(|| AnnuityError::overflow(format!("NPV discount factor at period {t}")))?;
        }
        if discount.is_zero() {
            return Err(AnnuityError::DivisionByZero {
                context: format!("NPV discount factor at period {t}"),
            });
        }
        result += cf / discount;
    }

    Ok(result)
}

/// Present Value
pub fn pv(rate: Rate, nper: u32, pmt: Money, fv: Money) -> AnnuityResult<Money> {
    if rate.is_zero() {
        return Ok(-(pmt * Decimal::from(nper) + fv));
    }

    let factor = compound_factor(rate, nper)?;

    if factor.is_zero() {
        return Err(AnnuityError::DivisionByZero {
            context: "PV factor".into(),
        });
    }

    let annuity_factor = (Decimal::ONE - Decimal::ONE / factor) / rate;
    Ok(-(pmt * annuity_factor + fv / factor))
}

/// Payment (PMT). Spreadsheet sign convention: a positive loan yields a
/// negative payment.
pub fn pmt(rate: Rate, nper: u32, present_value: Money, future_value: Money) -> AnnuityResult<Money> {
    if nper == 0 {
        return Err(AnnuityError::invalid("nper", "Number of periods must be > 0"));
    }

    if rate.is_zero() {
        return Ok(-(present_value + future_value) / Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper)?;
    let annuity_factor = (factor - Decimal::ONE) / rate;

    if annuity_factor.is_zero() {
        return Err(AnnuityError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    let numerator = present_value
        .checked_mul(factor)
        .and_then(|v| v.checked_add(future_value))
        .ok_or_else(|| AnnuityError::overflow("PMT numerator"))?;

    Ok(-numerator / annuity_factor)
}
