pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "formatting")]
pub mod format;

pub use error::AnnuityError;
pub use types::*;

#[cfg(feature = "amortization")]
pub use amortization::{calculate_loan, LoanParams, SimulationResult};

#[cfg(feature = "formatting")]
pub use format::format_currency;

/// Standard result type for all annuity operations
pub type AnnuityResult<T> = Result<T, AnnuityError>;
