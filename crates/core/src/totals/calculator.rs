//! Monthly ledger calculator.
//!
//! Pure aggregation over pre-summed contribution and expense totals; no side
//! effects, safe to rebuild at any time.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::status::{classify, status_message, suggestions};
use super::types::{
    BalanceResumen, Distribucion, Entradas, ExpenseCategory, FundBucket, GastosResumen,
    MonthlyInput, MonthlyLedger, SalarioPastoral, TreasuryPolicy,
};

/// The national levy rate over the congregational base: 10%.
#[must_use]
pub fn national_levy_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// Builds the monthly ledger view for one church and month.
///
/// Formulas:
/// - national fund = 10% of (diezmos + ofrendas) rounded to the whole
///   guaraní, plus 100% of every fully-remitted designated bucket
/// - available local funds = total income − national total
/// - calculated pastoral salary = residual after national total and operating
///   expenses, clamped at zero and optionally capped by policy
/// - saldo = total income − national total − operating expenses − calculated
///   salary
#[must_use]
pub fn build_monthly_ledger(input: &MonthlyInput, policy: &TreasuryPolicy) -> MonthlyLedger {
    let entradas = sum_entradas(&input.contribuciones, policy);
    let distribucion = distribute(&entradas);
    let gastos = sum_gastos(&input.gastos, input.honorarios_registrados);

    let residual =
        entradas.total - distribucion.fondo_nacional_total - gastos.operativos;
    let mut calculado = residual.max(Decimal::ZERO);
    if let Some(tope) = policy.salario_pastoral_tope {
        calculado = calculado.min(tope);
    }

    let saldo_calculado =
        entradas.total - distribucion.fondo_nacional_total - gastos.operativos - calculado;

    let salario_pastoral = SalarioPastoral {
        calculado,
        registrado: input.honorarios_registrados,
        diferencia: input.honorarios_registrados - calculado,
    };

    let status = classify(
        entradas.total,
        saldo_calculado,
        input.honorarios_registrados,
        calculado,
    );

    let mut ledger = MonthlyLedger {
        church_id: input.church_id,
        church_name: input.church_name.clone(),
        month: input.month,
        year: input.year,
        entradas,
        distribucion,
        gastos,
        salario_pastoral,
        balance: BalanceResumen {
            saldo_calculado,
            status,
            puede_cerrar: status.can_close(false),
            mensaje: String::new(),
            sugerencias: Vec::new(),
        },
        report: input.report.clone(),
    };

    ledger.balance.mensaje = status_message(&ledger);
    ledger.balance.sugerencias = suggestions(&ledger);
    ledger
}

fn bucket_total(contribuciones: &BTreeMap<FundBucket, Decimal>, bucket: FundBucket) -> Decimal {
    contribuciones.get(&bucket).copied().unwrap_or_default()
}

fn sum_entradas(
    contribuciones: &BTreeMap<FundBucket, Decimal>,
    policy: &TreasuryPolicy,
) -> Entradas {
    let designados: BTreeMap<FundBucket, Decimal> = contribuciones
        .iter()
        .filter(|(bucket, amount)| policy.is_remitido(**bucket) && **amount > Decimal::ZERO)
        .map(|(bucket, amount)| (*bucket, *amount))
        .collect();

    // Local leftovers: anything that is neither base nor remitted.
    let otros: Decimal = contribuciones
        .iter()
        .filter(|(bucket, _)| {
            !bucket.is_base_congregacional()
                && **bucket != FundBucket::Anexos
                && !policy.is_remitido(**bucket)
        })
        .map(|(_, amount)| *amount)
        .sum();

    Entradas {
        diezmos: bucket_total(contribuciones, FundBucket::Diezmo),
        ofrendas: bucket_total(contribuciones, FundBucket::Ofrenda),
        anexos: bucket_total(contribuciones, FundBucket::Anexos),
        otros,
        designados,
        total: contribuciones.values().copied().sum(),
    }
}

fn distribute(entradas: &Entradas) -> Distribucion {
    let base_congregacional = entradas.diezmos + entradas.ofrendas;
    let fondo_nacional_base = (base_congregacional * national_levy_rate()).round();
    let fondo_nacional_designados: Decimal = entradas.designados.values().copied().sum();
    let fondo_nacional_total = fondo_nacional_base + fondo_nacional_designados;

    Distribucion {
        base_congregacional,
        fondo_nacional_base,
        fondo_nacional_designados,
        fondo_nacional_total,
        disponible_local: entradas.total - fondo_nacional_total,
    }
}

fn sum_gastos(
    gastos: &BTreeMap<ExpenseCategory, Decimal>,
    honorarios_registrados: Decimal,
) -> GastosResumen {
    let operativos: Decimal = gastos.values().copied().sum();

    GastosResumen {
        por_categoria: gastos.clone(),
        operativos,
        honorarios_registrados,
        total_salidas: operativos + honorarios_registrados,
    }
}
