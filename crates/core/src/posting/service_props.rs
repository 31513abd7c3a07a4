//! Property-based tests for `PostingService`.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::PostingError;
use super::service::PostingService;
use super::types::PostingOrigin;

/// Strategy to generate positive whole-guaraní amounts.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(Decimal::from)
}

/// Strategy to generate a posting step: income or outflow.
#[derive(Debug, Clone, Copy)]
enum Step {
    Income(Decimal),
    Outflow(Decimal),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        positive_amount().prop_map(Step::Income),
        positive_amount().prop_map(Step::Outflow),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// For any sequence of accepted postings and reversals, the running
    /// balance equals the sum of the recorded movements.
    #[test]
    fn prop_balance_reconstructs_from_movement_log(
        steps in prop::collection::vec(step_strategy(), 1..40),
    ) {
        let mut balance = Decimal::ZERO;
        let mut movements: Vec<Decimal> = Vec::new();
        // (amount_in, amount_out) of accepted postings, eligible for deletion
        let mut posted: Vec<(Decimal, Decimal)> = Vec::new();

        for (i, step) in steps.iter().enumerate() {
            let (amount_in, amount_out) = match step {
                Step::Income(a) => (*a, Decimal::ZERO),
                Step::Outflow(a) => (Decimal::ZERO, *a),
            };

            if let Ok(plan) =
                PostingService::plan_posting(balance, amount_in, amount_out, PostingOrigin::User)
            {
                prop_assert_eq!(plan.previous_balance, balance);
                balance = plan.new_balance;
                movements.push(plan.movement);
                posted.push((amount_in, amount_out));
            }

            // Every third step, try reversing the oldest surviving posting.
            if i % 3 == 2 && !posted.is_empty() {
                let (rin, rout) = posted[0];
                if let Ok(plan) = PostingService::plan_reversal(balance, rin, rout) {
                    balance = plan.new_balance;
                    movements.push(plan.movement);
                    posted.remove(0);
                }
            }

            let reconstructed: Decimal = movements.iter().copied().sum();
            prop_assert_eq!(reconstructed, balance);
        }
    }

    /// A user posting never leaves the fund negative, and a rejected posting
    /// changes nothing.
    #[test]
    fn prop_user_postings_never_overdraw(
        start in 0i64..1_000_000i64,
        outflow in positive_amount(),
    ) {
        let balance = Decimal::from(start);
        match PostingService::plan_posting(balance, Decimal::ZERO, outflow, PostingOrigin::User) {
            Ok(plan) => prop_assert!(plan.new_balance >= Decimal::ZERO),
            Err(PostingError::InsufficientFunds { balance: reported, .. }) => {
                prop_assert_eq!(reported, balance);
                prop_assert!(outflow > balance);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
        }
    }

    /// Both-positive amount pairs are always rejected, for both origins.
    #[test]
    fn prop_both_amounts_rejected(
        amount_in in positive_amount(),
        amount_out in positive_amount(),
        balance in 0i64..1_000_000i64,
    ) {
        for origin in [PostingOrigin::User, PostingOrigin::System] {
            let result = PostingService::plan_posting(
                Decimal::from(balance),
                amount_in,
                amount_out,
                origin,
            );
            prop_assert!(
                matches!(result, Err(PostingError::AmbiguousAmounts { .. })),
                "expected AmbiguousAmounts, got {result:?}"
            );
        }
    }

    /// A posting followed by its reversal restores the original balance.
    #[test]
    fn prop_reversal_is_inverse(
        start in 0i64..1_000_000i64,
        amount in positive_amount(),
        income in proptest::bool::ANY,
    ) {
        let balance = Decimal::from(start);
        let (amount_in, amount_out) = if income {
            (amount, Decimal::ZERO)
        } else {
            (Decimal::ZERO, amount)
        };

        if let Ok(plan) =
            PostingService::plan_posting(balance, amount_in, amount_out, PostingOrigin::User)
        {
            if let Ok(reversal) =
                PostingService::plan_reversal(plan.new_balance, amount_in, amount_out)
            {
                prop_assert_eq!(reversal.new_balance, balance);
                prop_assert_eq!(reversal.movement, -plan.movement);
            }
        }
    }
}
