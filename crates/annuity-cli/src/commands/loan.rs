use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use annuity_core::amortization::{self, LoanParams, PaymentFrequency};
use annuity_core::format::format_currency;

use crate::input;

/// Loan definition shared by every loan command
#[derive(Args, Debug, Default)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Principal borrowed
    #[arg(long, alias = "principal")]
    pub capital: Option<Decimal>,

    /// Nominal annual interest rate in percent (5 = 5%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Number of instalments
    #[arg(long, alias = "periods")]
    pub duration: Option<u32>,

    /// Instalments per year: annual, semi_annual, quarterly, monthly
    #[arg(long)]
    pub frequency: Option<String>,
}

/// Arguments for the amortisation schedule
#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Arguments for the outstanding balance query
#[derive(Args)]
pub struct BalanceArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Number of instalments already paid
    #[arg(long)]
    pub after: u32,
}

/// Arguments for currency formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatArgs {
    /// Amount to format
    #[arg(long)]
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
struct BalanceOutput {
    after_period: u32,
    remaining_periods: u32,
    remaining_balance: Decimal,
}

#[derive(Debug, Serialize)]
struct FormatOutput {
    amount: Decimal,
    formatted: String,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(&args.loan)?;
    let output = amortization::calculate_loan(&params)?;
    let summary = output.result.summary();

    let mut value = serde_json::to_value(&output)?;
    if let Value::Object(ref mut envelope) = value {
        envelope.insert("summary".into(), serde_json::to_value(&summary)?);
    }
    Ok(value)
}

pub fn run_balance(args: BalanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(&args.loan)?;
    balance_value(&params, args.after)
}

fn balance_value(params: &LoanParams, after: u32) -> Result<Value, Box<dyn std::error::Error>> {
    let balance = amortization::remaining_balance(params, after)?;
    let output = BalanceOutput {
        after_period: after,
        remaining_periods: params.duration - after,
        remaining_balance: balance,
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_format(args: FormatArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let output = FormatOutput {
        amount: args.amount,
        formatted: format_currency(args.amount),
    };
    Ok(serde_json::to_value(output)?)
}

/// JSON file first, then piped stdin, then individual flags.
fn load_params(args: &LoanArgs) -> Result<LoanParams, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        tracing::debug!(path = %path, "reading loan from file");
        return input::file::read_json(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        tracing::debug!("reading loan from stdin");
        return Ok(serde_json::from_value(data)?);
    }
    params_from_flags(args)
}

/// Flags left out fall back to the default simulation.
fn params_from_flags(args: &LoanArgs) -> Result<LoanParams, Box<dyn std::error::Error>> {
    let defaults = LoanParams::default();
    if args.capital.is_none() && args.rate.is_none() && args.duration.is_none() {
        tracing::info!("no loan given, running the default simulation");
    }
    let frequency = match args.frequency.as_deref() {
        Some(f) => f.parse::<PaymentFrequency>()?,
        None => defaults.frequency,
    };
    Ok(LoanParams {
        capital: args.capital.unwrap_or(defaults.capital),
        rate: args.rate.unwrap_or(defaults.rate),
        duration: args.duration.unwrap_or(defaults.duration),
        frequency,
    })
}
