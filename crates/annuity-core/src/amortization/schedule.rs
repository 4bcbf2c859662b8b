use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::AnnuityError;
use crate::time_value;
use crate::types::*;
use crate::AnnuityResult;

/// Absolute tolerance for the residual balance left by decimal rounding.
pub const BALANCE_TOLERANCE: Decimal = dec!(0.000001);

/// Longest schedule accepted (100 years of monthly instalments is 1,200).
pub const MAX_PERIODS: u32 = 10_000;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Number of instalments per year. The nominal rate is split evenly across
/// them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    #[default]
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
}

impl PaymentFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Annual => 1,
            PaymentFrequency::SemiAnnual => 2,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Monthly => 12,
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentFrequency::Annual => "annual",
            PaymentFrequency::SemiAnnual => "semi_annual",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::Monthly => "monthly",
        };
        f.write_str(name)
    }
}

impl FromStr for PaymentFrequency {
    type Err = AnnuityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" | "yearly" => Ok(PaymentFrequency::Annual),
            "semi_annual" | "semiannual" | "semi-annual" => Ok(PaymentFrequency::SemiAnnual),
            "quarterly" => Ok(PaymentFrequency::Quarterly),
            "monthly" => Ok(PaymentFrequency::Monthly),
            other => Err(AnnuityError::invalid(
                "frequency",
                format!("Unknown payment frequency '{other}' (annual, semi_annual, quarterly, monthly)"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParams {
    /// Principal borrowed.
    pub capital: Money,
    /// Nominal annual rate as a percentage (5 = 5%).
    pub rate: Percent,
    /// Number of instalments.
    pub duration: u32,
    #[serde(default)]
    pub frequency: PaymentFrequency,
}

impl LoanParams {
    pub fn new(capital: Money, rate: Percent, duration: u32) -> Self {
        Self {
            capital,
            rate,
            duration,
            frequency: PaymentFrequency::Annual,
        }
    }

    /// Decimal interest rate applied to each period.
    pub fn periodic_rate(&self) -> Rate {
        percent_to_rate(self.rate) / Decimal::from(self.frequency.periods_per_year())
    }
}

/// The simulation shown before any user input: 10,000 at 5% over 5 years.
impl Default for LoanParams {
    fn default() -> Self {
        Self::new(dec!(10_000), dec!(5), 5)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub capital_start: Money,
    pub interest: Money,
    pub amortization: Money,
    pub annuity: Money,
    pub capital_end: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub schedule: Vec<AmortizationRow>,
    pub total_interest: Money,
    pub total_amortization: Money,
    pub total_paid: Money,
}

/// Headline figures of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub annuity: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    pub periods: u32,
}

impl SimulationResult {
    /// The constant payment; `None` only for an empty schedule.
    pub fn annuity(&self) -> Option<Money> {
        self.schedule.first().map(|row| row.annuity)
    }

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            annuity: self.annuity().unwrap_or(Decimal::ZERO),
            total_interest: self.total_interest,
            total_paid: self.total_paid,
            periods: self.schedule.len() as u32,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the constant-annuity (French) amortisation schedule of a loan and
/// wrap it in the standard output envelope.
pub fn calculate_loan(
    params: &LoanParams,
) -> AnnuityResult<ComputationOutput<SimulationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let (result, residual) = amortize(params)?;

    if residual.abs() > BALANCE_TOLERANCE {
        warnings.push(format!(
            "Final instalment absorbed a rounding residual of {residual}"
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "capital": params.capital.to_string(),
        "nominal_rate_pct": params.rate.to_string(),
        "periodic_rate": params.periodic_rate().to_string(),
        "duration": params.duration,
        "frequency": params.frequency.to_string(),
        "final_period_policy": "last instalment repays the outstanding balance exactly",
    });

    Ok(with_metadata(
        "Constant Annuity (French amortisation)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

/// Schedule and totals without the envelope.
pub fn build_schedule(params: &LoanParams) -> AnnuityResult<SimulationResult> {
    amortize(params).map(|(result, _)| result)
}

/// Explicit startup calculation with [`LoanParams::default`].
pub fn default_simulation() -> AnnuityResult<ComputationOutput<SimulationResult>> {
    calculate_loan(&LoanParams::default())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

pub(crate) fn validate_params(params: &LoanParams) -> AnnuityResult<()> {
    if params.capital <= Decimal::ZERO {
        return Err(AnnuityError::invalid("capital", "Capital must be positive."));
    }
    if params.rate < Decimal::ZERO {
        return Err(AnnuityError::invalid("rate", "Interest rate cannot be negative."));
    }
    if params.duration == 0 {
        return Err(AnnuityError::invalid(
            "duration",
            "Duration must be at least one period.",
        ));
    }
    if params.duration > MAX_PERIODS {
        return Err(AnnuityError::invalid(
            "duration",
            format!("Duration cannot exceed {MAX_PERIODS} periods."),
        ));
    }
    Ok(())
}

/// The constant instalment for a validated loan.
pub(crate) fn constant_annuity(params: &LoanParams) -> AnnuityResult<Money> {
    let payment = time_value::pmt(
        params.periodic_rate(),
        params.duration,
        params.capital,
        Decimal::ZERO,
    )?;
    Ok(-payment)
}

/// Returns the result and the residual principal the last instalment had to
/// absorb.
fn amortize(params: &LoanParams) -> AnnuityResult<(SimulationResult, Money)> {
    validate_params(params)?;

    let i = params.periodic_rate();
    let annuity = constant_annuity(params)?;

    tracing::debug!(
        capital = %params.capital,
        periodic_rate = %i,
        duration = params.duration,
        annuity = %annuity,
        "amortising loan"
    );

    let mut schedule = Vec::with_capacity(params.duration as usize);
    let mut balance = params.capital;
    let mut total_interest = Decimal::ZERO;
    let mut total_amortization = Decimal::ZERO;
    let mut residual = Decimal::ZERO;

    for period in 1..=params.duration {
        let capital_start = balance;
        let interest = capital_start
            .checked_mul(i)
            .ok_or_else(|| AnnuityError::overflow(format!("interest for period {period}")))?;

        let amortization = if period == params.duration {
            // Last instalment: whatever is still owed, so the loan closes at zero.
            residual = (annuity - interest) - capital_start;
            capital_start
        } else {
            annuity - interest
        };
        let capital_end = capital_start - amortization;

        total_interest = total_interest
            .checked_add(interest)
            .ok_or_else(|| AnnuityError::overflow("total interest"))?;
        total_amortization += amortization;

        schedule.push(AmortizationRow {
            period,
            capital_start,
            interest,
            amortization,
            annuity,
            capital_end,
        });
        balance = capital_end;
    }

    if residual.abs() > BALANCE_TOLERANCE {
        tracing::warn!(residual = %residual, "final instalment absorbed a rounding residual");
    } else {
        tracing::debug!(residual = %residual, "schedule closed");
    }

    let total_paid = total_interest + total_amortization;

    Ok((
        SimulationResult {
            schedule,
            total_interest,
            total_amortization,
            total_paid,
        },
        residual,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
