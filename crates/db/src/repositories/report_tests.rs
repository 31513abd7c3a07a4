//! Unit tests for the report field mapping.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tesoreria_core::closing::{plan_close_transfers, plan_report_postings};
use tesoreria_core::totals::{
    build_monthly_ledger, ExpenseCategory, FundBucket, MonthlyInput, MonthlyLedger,
    TreasuryPolicy,
};

use crate::entities::reports;

use super::apply_ledger_totals;

fn sample_ledger() -> MonthlyLedger {
    let input = MonthlyInput {
        church_id: 1,
        church_name: "IPU Villa Morra".to_string(),
        month: 3,
        year: 2024,
        contribuciones: [
            (FundBucket::Diezmo, dec!(900_000)),
            (FundBucket::Ofrenda, dec!(100_000)),
            (FundBucket::Misiones, dec!(150_000)),
            (FundBucket::Anexos, dec!(50_000)),
        ]
        .into_iter()
        .collect(),
        gastos: [(ExpenseCategory::ServiciosPublicos, dec!(120_000))]
            .into_iter()
            .collect(),
        honorarios_registrados: dec!(830_000),
        report: None,
    };
    build_monthly_ledger(&input, &TreasuryPolicy::default())
}

#[test]
fn test_ledger_totals_mapped_onto_report_row() {
    let ledger = sample_ledger();
    let mut active = reports::ActiveModel::default();

    apply_ledger_totals(&mut active, &ledger);

    assert_eq!(active.diezmos.clone().unwrap(), dec!(900_000));
    assert_eq!(active.ofrendas.clone().unwrap(), dec!(100_000));
    assert_eq!(active.anexos.clone().unwrap(), dec!(50_000));
    assert_eq!(active.misiones.clone().unwrap(), dec!(150_000));
    // Absent designated buckets land as zero, not NULL.
    assert_eq!(active.apy.clone().unwrap(), Decimal::ZERO);
    assert_eq!(active.total_entradas.clone().unwrap(), dec!(1_200_000));
    // 10% of 1.000.000 base + 150.000 misiones.
    assert_eq!(active.fondo_nacional.clone().unwrap(), dec!(250_000));
    assert_eq!(active.honorarios_pastoral.clone().unwrap(), dec!(830_000));
    assert_eq!(active.gastos_operativos.clone().unwrap(), dec!(120_000));
    assert_eq!(active.total_salidas.clone().unwrap(), dec!(950_000));
    assert_eq!(active.saldo_mes.clone().unwrap(), Decimal::ZERO);
    assert_eq!(
        active.balance_status.clone().unwrap(),
        Some("balanceado".to_string())
    );
}

#[test]
fn test_close_and_submit_plans_share_the_transfer_core() {
    // The submit plan is the close plan plus the operating flows; the shared
    // planner is what keeps re-posting idempotent across both entry points.
    let ledger = sample_ledger();

    let close = plan_close_transfers(&ledger);
    let submit = plan_report_postings(&ledger);

    for transfer in &close {
        assert!(
            submit.contains(transfer),
            "close transfer missing from submit plan: {transfer:?}"
        );
    }
    assert!(submit.len() > close.len());
}
