//! Monthly totals calculator and balance classification.
//!
//! This module derives a church's monthly financial position from
//! pre-aggregated contribution and expense sums:
//! - Entradas broken down by fund bucket
//! - The automatic distribution (national levy vs local availability)
//! - The calculated vs registered pastoral salary
//! - The balance classification that gates period close

pub mod calculator;
pub mod status;
pub mod types;

#[cfg(test)]
mod calculator_props;
#[cfg(test)]
mod tests;

pub use calculator::{build_monthly_ledger, national_levy_rate};
pub use status::{classify, SALDO_EPSILON};
pub use types::{
    BalanceResumen, BalanceStatus, Distribucion, Entradas, ExpenseCategory, FundBucket,
    GastosResumen, MonthlyInput, MonthlyLedger, PolicyError, ReportSummary, SalarioPastoral,
    TreasuryPolicy,
};
