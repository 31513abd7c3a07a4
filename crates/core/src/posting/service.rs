//! Posting service for movement validation and planning.
//!
//! This service contains pure business logic with no database dependencies.
//! The db layer locks the fund row, asks this service for a plan against the
//! locked balance, and executes the plan atomically.

use rust_decimal::Decimal;

use super::error::PostingError;
use super::types::{MovementPlan, PostingOrigin};

/// Posting service for movement validation and planning.
pub struct PostingService;

impl PostingService {
    /// Validates the `amount_in`/`amount_out` pair and returns the signed
    /// movement.
    ///
    /// Exactly one side must be positive; the other must be zero. A violation
    /// is a caller bug, not user input to coerce.
    ///
    /// # Errors
    ///
    /// Returns [`PostingError::NegativeAmount`] or
    /// [`PostingError::AmbiguousAmounts`] on invalid pairs.
    pub fn validate_amounts(
        amount_in: Decimal,
        amount_out: Decimal,
    ) -> Result<Decimal, PostingError> {
        if amount_in < Decimal::ZERO || amount_out < Decimal::ZERO {
            return Err(PostingError::NegativeAmount {
                amount_in,
                amount_out,
            });
        }

        match (amount_in > Decimal::ZERO, amount_out > Decimal::ZERO) {
            (true, false) => Ok(amount_in),
            (false, true) => Ok(-amount_out),
            _ => Err(PostingError::AmbiguousAmounts {
                amount_in,
                amount_out,
            }),
        }
    }

    /// Plans a posting against the fund's locked balance.
    ///
    /// User-initiated outflows that would overdraw the fund are rejected with
    /// the current balance in the message. System postings return the plan
    /// even when it overdraws; the executor logs the shortfall and proceeds,
    /// because blocking an already-accepted report submission is worse than a
    /// transiently negative fund.
    ///
    /// # Errors
    ///
    /// Returns a [`PostingError`] on invalid amounts or user overdraw.
    pub fn plan_posting(
        previous_balance: Decimal,
        amount_in: Decimal,
        amount_out: Decimal,
        origin: PostingOrigin,
    ) -> Result<MovementPlan, PostingError> {
        let movement = Self::validate_amounts(amount_in, amount_out)?;
        let new_balance = previous_balance + movement;

        // The guard only applies to outflows: income into an already
        // negative fund improves the balance and is always accepted.
        if new_balance < Decimal::ZERO
            && movement < Decimal::ZERO
            && origin == PostingOrigin::User
        {
            return Err(PostingError::InsufficientFunds {
                balance: previous_balance,
                requested: amount_out,
            });
        }

        Ok(MovementPlan {
            previous_balance,
            movement,
            new_balance,
        })
    }

    /// Plans the reversal of a recorded transaction (deletion).
    ///
    /// The reversal movement is the mirror of the recorded one. A reversal
    /// that would overdraw the fund is rejected: the money credited by the
    /// original posting has already been spent.
    ///
    /// # Errors
    ///
    /// Returns [`PostingError::ReversalWouldOverdraw`] when the fund cannot
    /// absorb the reversal.
    pub fn plan_reversal(
        current_balance: Decimal,
        amount_in: Decimal,
        amount_out: Decimal,
    ) -> Result<MovementPlan, PostingError> {
        let plan = Self::plan_unchecked_reversal(current_balance, amount_in, amount_out);

        if plan.overdraws() && plan.movement < Decimal::ZERO {
            return Err(PostingError::ReversalWouldOverdraw {
                balance: current_balance,
                reversal: plan.movement,
            });
        }

        Ok(plan)
    }

    /// Plans a reversal without the overdraw guard.
    ///
    /// Used when re-posting a report's system-generated transactions: the
    /// prior set must come off the ledger even if the fund transits below
    /// zero, otherwise a re-close would leave duplicated postings. The
    /// executor logs the shortfall.
    #[must_use]
    pub fn plan_unchecked_reversal(
        current_balance: Decimal,
        amount_in: Decimal,
        amount_out: Decimal,
    ) -> MovementPlan {
        let movement = amount_out - amount_in;

        MovementPlan {
            previous_balance: current_balance,
            movement,
            new_balance: current_balance + movement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_income() {
        assert_eq!(
            PostingService::validate_amounts(dec!(100_000), Decimal::ZERO),
            Ok(dec!(100_000))
        );
    }

    #[test]
    fn test_validate_outflow() {
        assert_eq!(
            PostingService::validate_amounts(Decimal::ZERO, dec!(50_000)),
            Ok(dec!(-50_000))
        );
    }

    #[test]
    fn test_validate_both_positive_rejected() {
        let result = PostingService::validate_amounts(dec!(100), dec!(200));
        assert!(matches!(
            result,
            Err(PostingError::AmbiguousAmounts { .. })
        ));
    }

    #[test]
    fn test_validate_both_zero_rejected() {
        let result = PostingService::validate_amounts(Decimal::ZERO, Decimal::ZERO);
        assert!(matches!(
            result,
            Err(PostingError::AmbiguousAmounts { .. })
        ));
    }

    #[test]
    fn test_validate_negative_rejected() {
        let result = PostingService::validate_amounts(dec!(-100), Decimal::ZERO);
        assert!(matches!(result, Err(PostingError::NegativeAmount { .. })));
    }

    #[test]
    fn test_plan_income_posting() {
        let plan = PostingService::plan_posting(
            dec!(300_000),
            dec!(100_000),
            Decimal::ZERO,
            PostingOrigin::User,
        )
        .unwrap();

        assert_eq!(plan.previous_balance, dec!(300_000));
        assert_eq!(plan.movement, dec!(100_000));
        assert_eq!(plan.new_balance, dec!(400_000));
        assert!(!plan.overdraws());
    }

    #[test]
    fn test_user_overdraw_rejected_with_balance_in_error() {
        let result = PostingService::plan_posting(
            dec!(40_000),
            Decimal::ZERO,
            dec!(90_000),
            PostingOrigin::User,
        );

        match result {
            Err(PostingError::InsufficientFunds { balance, requested }) => {
                assert_eq!(balance, dec!(40_000));
                assert_eq!(requested, dec!(90_000));
            }
            other => panic!("expected InsufficientFunds, got {other:?}"),
        }
    }

    #[test]
    fn test_system_overdraw_tolerated() {
        let plan = PostingService::plan_posting(
            dec!(40_000),
            Decimal::ZERO,
            dec!(90_000),
            PostingOrigin::System,
        )
        .unwrap();

        assert!(plan.overdraws());
        assert_eq!(plan.new_balance, dec!(-50_000));
    }

    #[test]
    fn test_income_into_negative_fund_allowed() {
        // A fund left negative by system postings still accepts income.
        let plan = PostingService::plan_posting(
            dec!(-120_000),
            dec!(50_000),
            Decimal::ZERO,
            PostingOrigin::User,
        )
        .unwrap();

        assert_eq!(plan.new_balance, dec!(-70_000));
    }

    #[test]
    fn test_reversal_that_improves_negative_balance_allowed() {
        // Reversing an outflow credits the fund back even while negative.
        let plan =
            PostingService::plan_reversal(dec!(-90_000), Decimal::ZERO, dec!(30_000)).unwrap();

        assert_eq!(plan.new_balance, dec!(-60_000));
    }

    #[test]
    fn test_outflow_to_exactly_zero_allowed() {
        let plan = PostingService::plan_posting(
            dec!(90_000),
            Decimal::ZERO,
            dec!(90_000),
            PostingOrigin::User,
        )
        .unwrap();

        assert_eq!(plan.new_balance, Decimal::ZERO);
    }

    #[test]
    fn test_reversal_of_income() {
        // Reversing an income of 100,000 debits the fund.
        let plan = PostingService::plan_reversal(dec!(250_000), dec!(100_000), Decimal::ZERO)
            .unwrap();

        assert_eq!(plan.movement, dec!(-100_000));
        assert_eq!(plan.new_balance, dec!(150_000));
    }

    #[test]
    fn test_reversal_of_outflow() {
        // Reversing an outflow of 30,000 credits the fund back.
        let plan =
            PostingService::plan_reversal(dec!(10_000), Decimal::ZERO, dec!(30_000)).unwrap();

        assert_eq!(plan.movement, dec!(30_000));
        assert_eq!(plan.new_balance, dec!(40_000));
    }

    #[test]
    fn test_reversal_overdraw_rejected() {
        // The credited money was already spent; the fund cannot give it back.
        let result = PostingService::plan_reversal(dec!(20_000), dec!(100_000), Decimal::ZERO);

        assert!(matches!(
            result,
            Err(PostingError::ReversalWouldOverdraw { .. })
        ));
    }

    #[test]
    fn test_unchecked_reversal_tolerates_overdraw() {
        let plan =
            PostingService::plan_unchecked_reversal(dec!(20_000), dec!(100_000), Decimal::ZERO);

        assert!(plan.overdraws());
        assert_eq!(plan.new_balance, dec!(-80_000));
    }
}
