//! Unit tests for the monthly ledger calculator.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::calculator::build_monthly_ledger;
use super::types::{
    BalanceStatus, ExpenseCategory, FundBucket, MonthlyInput, TreasuryPolicy,
};

fn input_with(
    contribuciones: &[(FundBucket, Decimal)],
    gastos: &[(ExpenseCategory, Decimal)],
    honorarios: Decimal,
) -> MonthlyInput {
    MonthlyInput {
        church_id: 1,
        church_name: "IPU Asunción Central".to_string(),
        month: 3,
        year: 2024,
        contribuciones: contribuciones.iter().copied().collect(),
        gastos: gastos.iter().copied().collect(),
        honorarios_registrados: honorarios,
        report: None,
    }
}

#[test]
fn test_month_with_tithes_and_offerings_pending_invoice() {
    // Diezmos 900.000 + ofrendas 100.000, nothing else: the national levy is
    // 10% of the base and the whole residual is the pastoral salary.
    let input = input_with(
        &[
            (FundBucket::Diezmo, dec!(900_000)),
            (FundBucket::Ofrenda, dec!(100_000)),
        ],
        &[],
        Decimal::ZERO,
    );

    let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

    assert_eq!(ledger.entradas.total, dec!(1_000_000));
    assert_eq!(ledger.distribucion.base_congregacional, dec!(1_000_000));
    assert_eq!(ledger.distribucion.fondo_nacional_base, dec!(100_000));
    assert_eq!(ledger.distribucion.fondo_nacional_total, dec!(100_000));
    assert_eq!(ledger.distribucion.disponible_local, dec!(900_000));
    assert_eq!(ledger.salario_pastoral.calculado, dec!(900_000));
    assert_eq!(ledger.balance.saldo_calculado, Decimal::ZERO);
    assert_eq!(
        ledger.balance.status,
        BalanceStatus::PendienteFacturaPastoral
    );
    assert!(!ledger.balance.puede_cerrar);
    assert!(ledger.balance.mensaje.contains("₲ 900.000"));
    assert!(
        ledger
            .balance
            .sugerencias
            .iter()
            .any(|s| s.contains("factura") && s.contains("₲ 900.000"))
    );
}

#[test]
fn test_registering_the_invoice_balances_the_month() {
    // Same month, now with the 900.000 pastoral invoice registered.
    let input = input_with(
        &[
            (FundBucket::Diezmo, dec!(900_000)),
            (FundBucket::Ofrenda, dec!(100_000)),
        ],
        &[],
        dec!(900_000),
    );

    let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

    assert_eq!(ledger.balance.status, BalanceStatus::Balanceado);
    assert!(ledger.balance.puede_cerrar);
    assert!(ledger.balance.sugerencias.is_empty());
    assert_eq!(ledger.gastos.total_salidas, dec!(900_000));
}

#[test]
fn test_anexos_excluded_from_congregational_base() {
    let input = input_with(
        &[
            (FundBucket::Diezmo, dec!(500_000)),
            (FundBucket::Ofrenda, dec!(100_000)),
            (FundBucket::Anexos, dec!(400_000)),
        ],
        &[],
        Decimal::ZERO,
    );

    let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

    // Base is 600.000, not 1.000.000: anexos stay local.
    assert_eq!(ledger.distribucion.base_congregacional, dec!(600_000));
    assert_eq!(ledger.distribucion.fondo_nacional_base, dec!(60_000));
    assert_eq!(ledger.entradas.anexos, dec!(400_000));
    assert_eq!(ledger.distribucion.disponible_local, dec!(940_000));
}

#[test]
fn test_designated_buckets_remitted_in_full() {
    let input = input_with(
        &[
            (FundBucket::Diezmo, dec!(1_000_000)),
            (FundBucket::Misiones, dec!(150_000)),
            (FundBucket::Apy, dec!(50_000)),
        ],
        &[],
        Decimal::ZERO,
    );

    let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

    assert_eq!(ledger.distribucion.fondo_nacional_base, dec!(100_000));
    assert_eq!(ledger.distribucion.fondo_nacional_designados, dec!(200_000));
    assert_eq!(ledger.distribucion.fondo_nacional_total, dec!(300_000));
    assert_eq!(ledger.entradas.designados.len(), 2);
    assert_eq!(
        ledger.entradas.designados.get(&FundBucket::Misiones),
        Some(&dec!(150_000))
    );
    // Designated money is not available locally.
    assert_eq!(ledger.distribucion.disponible_local, dec!(900_000));
}

#[test]
fn test_operating_expenses_reduce_the_salary_residual() {
    let input = input_with(
        &[
            (FundBucket::Diezmo, dec!(900_000)),
            (FundBucket::Ofrenda, dec!(100_000)),
        ],
        &[
            (ExpenseCategory::ServiciosPublicos, dec!(120_000)),
            (ExpenseCategory::Mantenimiento, dec!(80_000)),
        ],
        dec!(700_000),
    );

    let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

    assert_eq!(ledger.gastos.operativos, dec!(200_000));
    // 1.000.000 - 100.000 - 200.000 = 700.000 residual.
    assert_eq!(ledger.salario_pastoral.calculado, dec!(700_000));
    assert_eq!(ledger.balance.status, BalanceStatus::Balanceado);
}

#[test]
fn test_overspent_month_is_a_deficit() {
    // Expenses exceed what the month can support; the residual clamps at
    // zero and the shortfall surfaces as a negative saldo.
    let input = input_with(
        &[(FundBucket::Diezmo, dec!(500_000))],
        &[(ExpenseCategory::Mantenimiento, dec!(600_000))],
        Decimal::ZERO,
    );

    let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

    assert_eq!(ledger.salario_pastoral.calculado, Decimal::ZERO);
    assert_eq!(ledger.balance.saldo_calculado, dec!(-150_000));
    assert_eq!(ledger.balance.status, BalanceStatus::Deficit);
    assert!(!ledger.balance.puede_cerrar);
    assert!(ledger.balance.mensaje.contains("₲ 150.000"));
}

#[test]
fn test_salary_cap_produces_a_superavit() {
    let policy = TreasuryPolicy {
        salario_pastoral_tope: Some(dec!(600_000)),
        ..TreasuryPolicy::default()
    };
    let input = input_with(
        &[
            (FundBucket::Diezmo, dec!(900_000)),
            (FundBucket::Ofrenda, dec!(100_000)),
        ],
        &[],
        dec!(600_000),
    );

    let ledger = build_monthly_ledger(&input, &policy);

    assert_eq!(ledger.salario_pastoral.calculado, dec!(600_000));
    assert_eq!(ledger.balance.saldo_calculado, dec!(300_000));
    assert_eq!(ledger.balance.status, BalanceStatus::Superavit);
    assert!(!ledger.balance.puede_cerrar);
}

#[test]
fn test_wrong_invoice_is_a_discrepancy() {
    let input = input_with(
        &[
            (FundBucket::Diezmo, dec!(900_000)),
            (FundBucket::Ofrenda, dec!(100_000)),
        ],
        &[],
        dec!(850_000),
    );

    let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

    assert_eq!(ledger.balance.status, BalanceStatus::DiscrepanciaHonorarios);
    assert_eq!(ledger.salario_pastoral.diferencia, dec!(-50_000));
    assert!(!ledger.balance.puede_cerrar);
    assert!(ledger.balance.mensaje.contains("₲ 850.000"));
    assert!(ledger.balance.mensaje.contains("₲ 900.000"));
}

#[test]
fn test_empty_month_has_no_entries() {
    let input = input_with(&[], &[], Decimal::ZERO);

    let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

    assert_eq!(ledger.balance.status, BalanceStatus::SinEntradas);
    assert!(!ledger.balance.puede_cerrar);
    assert_eq!(ledger.entradas.total, Decimal::ZERO);
    assert_eq!(ledger.distribucion.fondo_nacional_total, Decimal::ZERO);
}

#[test]
fn test_levy_rounds_to_whole_guaranies() {
    // 10% of 1.234.565 is 123.456,5; banker's rounding lands on 123.456 and
    // the residual salary absorbs the remainder, keeping the saldo at zero.
    let input = input_with(
        &[(FundBucket::Diezmo, dec!(1_234_565))],
        &[],
        Decimal::ZERO,
    );

    let ledger = build_monthly_ledger(&input, &TreasuryPolicy::default());

    assert_eq!(ledger.distribucion.fondo_nacional_base, dec!(123_456));
    assert_eq!(ledger.balance.saldo_calculado, Decimal::ZERO);
    assert_eq!(
        ledger.balance.status,
        BalanceStatus::PendienteFacturaPastoral
    );
}

#[test]
fn test_custom_remittance_policy() {
    // A deployment that only remits misiones: apy money stays local.
    let policy =
        TreasuryPolicy::from_overrides(&["misiones".to_string()], None).unwrap();
    let input = input_with(
        &[
            (FundBucket::Diezmo, dec!(1_000_000)),
            (FundBucket::Misiones, dec!(100_000)),
            (FundBucket::Apy, dec!(50_000)),
        ],
        &[],
        Decimal::ZERO,
    );

    let ledger = build_monthly_ledger(&input, &policy);

    assert_eq!(ledger.distribucion.fondo_nacional_designados, dec!(100_000));
    assert_eq!(ledger.entradas.otros, dec!(50_000));
    assert_eq!(ledger.distribucion.fondo_nacional_total, dec!(200_000));
}
