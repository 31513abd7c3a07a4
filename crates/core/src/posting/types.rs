//! Posting domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Who initiated a posting.
///
/// The negative-balance policy differs by origin: ad hoc user postings must
/// never overdraw a fund, while system-generated report postings tolerate a
/// transiently negative balance (logged by the executor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingOrigin {
    /// Manually created by a treasurer.
    User,
    /// Generated by report submission or period close.
    System,
}

/// A validated balance movement, ready to execute.
///
/// `new_balance` is the snapshot the transaction row records, and
/// `movement` is the signed delta appended to the fund movement log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementPlan {
    /// Fund balance before the movement.
    pub previous_balance: Decimal,
    /// Signed delta (positive for income, negative for outflow).
    pub movement: Decimal,
    /// Fund balance after the movement.
    pub new_balance: Decimal,
}

impl MovementPlan {
    /// True when executing this plan leaves the fund below zero.
    #[must_use]
    pub fn overdraws(&self) -> bool {
        self.new_balance < Decimal::ZERO
    }
}
