//! Close gating and transfer planning.

use rust_decimal::Decimal;

use crate::totals::{FundBucket, MonthlyLedger};

use super::types::{CloseRejection, FundType, PlannedTransfer};

/// Name of the fund receiving the 10% levy.
pub const NATIONAL_FUND: &str = "Fondo Nacional";

/// Name of the church operating fund used by report auto-postings.
pub const OPERATING_FUND: &str = "Fondo General";

/// Checks that the month may close.
///
/// `force` overrides only deficit/surplus states; see
/// [`crate::totals::BalanceStatus::can_close`].
///
/// # Errors
///
/// Returns a [`CloseRejection`] carrying the status line and remediation
/// suggestions when the month is not closable.
pub fn ensure_closable(ledger: &MonthlyLedger, force: bool) -> Result<(), CloseRejection> {
    if ledger.balance.status.can_close(force) {
        Ok(())
    } else {
        Err(CloseRejection {
            status: ledger.balance.status,
            mensaje: ledger.balance.mensaje.clone(),
            sugerencias: ledger.balance.sugerencias.clone(),
        })
    }
}

/// Plans the fund transactions a period close must post.
///
/// One credit to the national fund for the 10% levy, plus one credit per
/// fully-remitted designated bucket with a nonzero total, itemized per
/// bucket. Zero amounts are skipped.
#[must_use]
pub fn plan_close_transfers(ledger: &MonthlyLedger) -> Vec<PlannedTransfer> {
    let mut transfers = Vec::new();

    if ledger.distribucion.fondo_nacional_base > Decimal::ZERO {
        transfers.push(PlannedTransfer {
            fund_name: NATIONAL_FUND.to_string(),
            fund_type: FundType::Nacional,
            concept: concept("Fondo nacional 10%", ledger),
            amount_in: ledger.distribucion.fondo_nacional_base,
            amount_out: Decimal::ZERO,
        });
    }

    for (bucket, amount) in &ledger.entradas.designados {
        if *amount > Decimal::ZERO {
            let (fund_name, fund_type) = destination_fund(*bucket);
            transfers.push(PlannedTransfer {
                fund_name: fund_name.to_string(),
                fund_type,
                concept: concept(&format!("Aporte {}", bucket.label()), ledger),
                amount_in: *amount,
                amount_out: Decimal::ZERO,
            });
        }
    }

    transfers
}

/// Plans the fund transactions a manual report submission must post.
///
/// The close transfers plus the church operating flows: total entradas in,
/// pastoral honoraria and operating costs out. Both entry points share this
/// planning so re-posting stays idempotent.
#[must_use]
pub fn plan_report_postings(ledger: &MonthlyLedger) -> Vec<PlannedTransfer> {
    let mut transfers = Vec::new();

    if ledger.entradas.total > Decimal::ZERO {
        transfers.push(PlannedTransfer {
            fund_name: OPERATING_FUND.to_string(),
            fund_type: FundType::Otro,
            concept: concept("Entradas del mes", ledger),
            amount_in: ledger.entradas.total,
            amount_out: Decimal::ZERO,
        });
    }

    transfers.extend(plan_close_transfers(ledger));

    if ledger.gastos.honorarios_registrados > Decimal::ZERO {
        transfers.push(PlannedTransfer {
            fund_name: OPERATING_FUND.to_string(),
            fund_type: FundType::Otro,
            concept: concept("Honorarios pastorales", ledger),
            amount_in: Decimal::ZERO,
            amount_out: ledger.gastos.honorarios_registrados,
        });
    }

    if ledger.gastos.operativos > Decimal::ZERO {
        transfers.push(PlannedTransfer {
            fund_name: OPERATING_FUND.to_string(),
            fund_type: FundType::Otro,
            concept: concept("Gastos operativos", ledger),
            amount_in: Decimal::ZERO,
            amount_out: ledger.gastos.operativos,
        });
    }

    transfers
}

/// Destination fund for a fully-remitted bucket.
///
/// Buckets that are not remitted under the built-in policy fall back to the
/// national fund as a designated transfer; a deployment that remits them
/// decided they belong to the national treasury.
fn destination_fund(bucket: FundBucket) -> (&'static str, FundType) {
    match bucket {
        FundBucket::Misiones => ("Misiones", FundType::Misionero),
        FundBucket::LazosAmor => ("Lazos de Amor", FundType::Designado),
        FundBucket::MisionPosible => ("Misión Posible", FundType::Designado),
        FundBucket::Apy => ("APY", FundType::Designado),
        FundBucket::InstitutoBiblico => ("Instituto Bíblico", FundType::Educativo),
        FundBucket::DiezmoPastoral => ("Diezmo Pastoral", FundType::Designado),
        FundBucket::Caballeros => ("Caballeros", FundType::Designado),
        FundBucket::Diezmo
        | FundBucket::Ofrenda
        | FundBucket::Anexos
        | FundBucket::Otros => (NATIONAL_FUND, FundType::Nacional),
    }
}

fn concept(prefix: &str, ledger: &MonthlyLedger) -> String {
    format!(
        "{prefix} {:02}/{} - {}",
        ledger.month, ledger.year, ledger.church_name
    )
}
