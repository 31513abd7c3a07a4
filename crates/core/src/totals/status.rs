//! Balance classification, status messages, and remediation suggestions.

use rust_decimal::Decimal;
use tesoreria_shared::types::money::format_guaranies;

use super::types::{BalanceStatus, MonthlyLedger};

/// Comparison tolerance for saldo classification: one whole guaraní.
///
/// Amounts are whole-unit integers with no fractional cents; the only
/// sub-guaraní residue comes from rounding the 10% levy. Ports to currencies
/// with fractional units must rescale this.
pub const SALDO_EPSILON: Decimal = Decimal::ONE;

/// Classifies the month's reconciliation state.
///
/// The decision table, evaluated in order:
/// 1. no income → `SinEntradas`
/// 2. saldo within epsilon, registered == calculated → `Balanceado`
/// 3. saldo within epsilon, registered == 0 → `PendienteFacturaPastoral`
/// 4. saldo within epsilon, registered ≠ calculated → `DiscrepanciaHonorarios`
/// 5. saldo below −epsilon → `Deficit`
/// 6. otherwise → `Superavit`
#[must_use]
pub fn classify(
    total_entradas: Decimal,
    saldo_calculado: Decimal,
    honorarios_registrados: Decimal,
    salario_calculado: Decimal,
) -> BalanceStatus {
    if total_entradas == Decimal::ZERO {
        return BalanceStatus::SinEntradas;
    }

    if saldo_calculado.abs() < SALDO_EPSILON {
        if honorarios_registrados == salario_calculado {
            BalanceStatus::Balanceado
        } else if honorarios_registrados == Decimal::ZERO {
            BalanceStatus::PendienteFacturaPastoral
        } else {
            BalanceStatus::DiscrepanciaHonorarios
        }
    } else if saldo_calculado.is_sign_negative() {
        BalanceStatus::Deficit
    } else {
        BalanceStatus::Superavit
    }
}

/// Builds the human-readable status line for a classified ledger.
#[must_use]
pub fn status_message(ledger: &MonthlyLedger) -> String {
    let saldo = ledger.balance.saldo_calculado;
    match ledger.balance.status {
        BalanceStatus::SinEntradas => format!(
            "Sin entradas registradas en {:02}/{}; no hay nada que conciliar.",
            ledger.month, ledger.year
        ),
        BalanceStatus::Balanceado => {
            "Mes balanceado: las entradas y salidas concilian.".to_string()
        }
        BalanceStatus::PendienteFacturaPastoral => format!(
            "Falta registrar la factura de honorarios pastorales por {}.",
            format_guaranies(ledger.salario_pastoral.calculado)
        ),
        BalanceStatus::DiscrepanciaHonorarios => format!(
            "Los honorarios registrados ({}) difieren del salario calculado ({}).",
            format_guaranies(ledger.salario_pastoral.registrado),
            format_guaranies(ledger.salario_pastoral.calculado)
        ),
        BalanceStatus::Deficit => format!(
            "Déficit de {}: las salidas superan las entradas disponibles.",
            format_guaranies(saldo.abs())
        ),
        BalanceStatus::Superavit => format!(
            "Superávit de {} sin asignar.",
            format_guaranies(saldo)
        ),
    }
}

/// Builds the actionable remediation steps for a classified ledger.
#[must_use]
pub fn suggestions(ledger: &MonthlyLedger) -> Vec<String> {
    let saldo = ledger.balance.saldo_calculado;
    match ledger.balance.status {
        BalanceStatus::SinEntradas => vec![
            "Cargar los registros de culto del mes antes de conciliar.".to_string(),
        ],
        BalanceStatus::Balanceado => Vec::new(),
        BalanceStatus::PendienteFacturaPastoral => vec![
            format!(
                "Registrar la factura de honorarios pastorales por {}.",
                format_guaranies(ledger.salario_pastoral.calculado)
            ),
            "Verificar que el gasto esté marcado como honorario pastoral.".to_string(),
        ],
        BalanceStatus::DiscrepanciaHonorarios => vec![format!(
            "Corregir la factura registrada ({}) o revisar los gastos del mes; el cálculo arroja {}.",
            format_guaranies(ledger.salario_pastoral.registrado),
            format_guaranies(ledger.salario_pastoral.calculado)
        )],
        BalanceStatus::Deficit => vec![
            format!(
                "Revisar los gastos registrados o cargar entradas faltantes para cubrir {}.",
                format_guaranies(saldo.abs())
            ),
            "El período puede cerrarse con cierre forzado dejando el déficit asentado."
                .to_string(),
        ],
        BalanceStatus::Superavit => vec![
            format!(
                "Asignar el excedente de {} a un fondo designado o revisar el tope salarial.",
                format_guaranies(saldo)
            ),
            "El período puede cerrarse con cierre forzado dejando el superávit asentado."
                .to_string(),
        ],
    }
}
