//! Property-based tests for the monthly ledger calculator.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::build_monthly_ledger;
use super::status::SALDO_EPSILON;
use super::types::{BalanceStatus, ExpenseCategory, FundBucket, MonthlyInput, TreasuryPolicy};

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..50_000_000i64).prop_map(Decimal::from)
}

fn contributions_strategy() -> impl Strategy<Value = BTreeMap<FundBucket, Decimal>> {
    prop::collection::btree_map(
        prop::sample::select(FundBucket::ALL.to_vec()),
        amount(),
        0..8,
    )
}

fn expenses_strategy() -> impl Strategy<Value = BTreeMap<ExpenseCategory, Decimal>> {
    prop::collection::btree_map(
        prop::sample::select(ExpenseCategory::ALL.to_vec()),
        amount(),
        0..4,
    )
}

fn make_input(
    contribuciones: BTreeMap<FundBucket, Decimal>,
    gastos: BTreeMap<ExpenseCategory, Decimal>,
    honorarios: Decimal,
) -> MonthlyInput {
    MonthlyInput {
        church_id: 1,
        church_name: "Iglesia de prueba".to_string(),
        month: 6,
        year: 2024,
        contribuciones,
        gastos,
        honorarios_registrados: honorarios,
        report: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The national total and the local availability always partition the
    /// income exactly.
    #[test]
    fn prop_distribution_partitions_income(
        contribuciones in contributions_strategy(),
        gastos in expenses_strategy(),
        honorarios in amount(),
    ) {
        let input = make_input(contribuciones, gastos, honorarios);
        let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

        prop_assert_eq!(
            ledger.distribucion.fondo_nacional_total + ledger.distribucion.disponible_local,
            ledger.entradas.total
        );
    }

    /// The levy never exceeds 10% of the base (plus the designated sums), and
    /// designated money is never levied twice.
    #[test]
    fn prop_levy_bounds(contribuciones in contributions_strategy()) {
        let input = make_input(contribuciones, BTreeMap::new(), Decimal::ZERO);
        let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

        let base = ledger.entradas.diezmos + ledger.entradas.ofrendas;
        let tenth = base * Decimal::new(10, 2);

        prop_assert!((ledger.distribucion.fondo_nacional_base - tenth).abs() < SALDO_EPSILON);
        prop_assert_eq!(
            ledger.distribucion.fondo_nacional_total,
            ledger.distribucion.fondo_nacional_base
                + ledger.distribucion.fondo_nacional_designados
        );
    }

    /// With the default policy (no salary cap), the saldo is never positive:
    /// the residual either absorbs everything or clamps at zero and leaves a
    /// deficit.
    #[test]
    fn prop_uncapped_saldo_never_positive(
        contribuciones in contributions_strategy(),
        gastos in expenses_strategy(),
        honorarios in amount(),
    ) {
        let input = make_input(contribuciones, gastos, honorarios);
        let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

        prop_assert!(ledger.balance.saldo_calculado <= Decimal::ZERO);
        prop_assert!(ledger.salario_pastoral.calculado >= Decimal::ZERO);
    }

    /// Classification always matches the closability flag.
    #[test]
    fn prop_classification_consistent_with_closability(
        contribuciones in contributions_strategy(),
        gastos in expenses_strategy(),
        honorarios in amount(),
    ) {
        let input = make_input(contribuciones, gastos, honorarios);
        let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

        prop_assert_eq!(
            ledger.balance.puede_cerrar,
            ledger.balance.status == BalanceStatus::Balanceado
        );

        if ledger.entradas.total == Decimal::ZERO {
            prop_assert_eq!(ledger.balance.status, BalanceStatus::SinEntradas);
        }
    }

    /// The status line and suggestions are never silently empty for a
    /// non-closable month.
    #[test]
    fn prop_blocked_months_carry_guidance(
        contribuciones in contributions_strategy(),
        gastos in expenses_strategy(),
        honorarios in amount(),
    ) {
        let input = make_input(contribuciones, gastos, honorarios);
        let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

        prop_assert!(!ledger.balance.mensaje.is_empty());
        if !ledger.balance.puede_cerrar {
            prop_assert!(!ledger.balance.sugerencias.is_empty());
        }
    }
}
