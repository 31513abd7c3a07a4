//! Error types for posting operations.

use rust_decimal::Decimal;
use thiserror::Error;

/// Error types for posting validation and planning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostingError {
    /// Exactly one of `amount_in`/`amount_out` must be positive.
    #[error(
        "exactly one of amount_in/amount_out must be positive (got in={amount_in}, out={amount_out})"
    )]
    AmbiguousAmounts {
        /// The offered income amount.
        amount_in: Decimal,
        /// The offered outflow amount.
        amount_out: Decimal,
    },

    /// Amounts must never be negative; direction is carried by the column.
    #[error("amounts must not be negative (got in={amount_in}, out={amount_out})")]
    NegativeAmount {
        /// The offered income amount.
        amount_in: Decimal,
        /// The offered outflow amount.
        amount_out: Decimal,
    },

    /// A user-initiated outflow would overdraw the fund.
    #[error("insufficient funds: current balance is {balance}, outflow of {requested} rejected")]
    InsufficientFunds {
        /// The fund's current balance.
        balance: Decimal,
        /// The rejected outflow amount.
        requested: Decimal,
    },

    /// Deleting the transaction would overdraw the fund.
    #[error("reversal rejected: current balance is {balance}, reversal movement is {reversal}")]
    ReversalWouldOverdraw {
        /// The fund's current balance.
        balance: Decimal,
        /// The signed reversal movement.
        reversal: Decimal,
    },
}
