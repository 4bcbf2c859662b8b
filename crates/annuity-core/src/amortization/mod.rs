pub mod balance;
pub mod schedule;

pub use balance::remaining_balance;
pub use schedule::{
    build_schedule, calculate_loan, default_simulation, AmortizationRow, LoanParams,
    PaymentFrequency, SimulationResult, SimulationSummary,
};
