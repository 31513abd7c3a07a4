//! Monthly ledger domain types.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category tag on a worship contribution, routing money during closing.
///
/// `Diezmo` and `Ofrenda` form the congregational base subject to the 10%
/// national levy. The designated buckets are remitted to the national
/// treasury in full; `Anexos` and `Otros` stay local.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FundBucket {
    /// Tithe, part of the congregational base.
    Diezmo,
    /// General offering, part of the congregational base.
    Ofrenda,
    /// Income from annex congregations; local, not levied.
    Anexos,
    /// Missions offering, fully remitted.
    Misiones,
    /// "Lazos de Amor" campaign, fully remitted.
    LazosAmor,
    /// "Misión Posible" campaign, fully remitted.
    MisionPosible,
    /// National youth association, fully remitted.
    Apy,
    /// Bible institute support, fully remitted.
    InstitutoBiblico,
    /// Pastor's own tithe, fully remitted.
    DiezmoPastoral,
    /// Men's ministry, fully remitted.
    Caballeros,
    /// Anything else; stays local.
    Otros,
}

impl FundBucket {
    /// All buckets, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Diezmo,
        Self::Ofrenda,
        Self::Anexos,
        Self::Misiones,
        Self::LazosAmor,
        Self::MisionPosible,
        Self::Apy,
        Self::InstitutoBiblico,
        Self::DiezmoPastoral,
        Self::Caballeros,
        Self::Otros,
    ];

    /// Snake-case name as stored in the contributions table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diezmo => "diezmo",
            Self::Ofrenda => "ofrenda",
            Self::Anexos => "anexos",
            Self::Misiones => "misiones",
            Self::LazosAmor => "lazos_amor",
            Self::MisionPosible => "mision_posible",
            Self::Apy => "apy",
            Self::InstitutoBiblico => "instituto_biblico",
            Self::DiezmoPastoral => "diezmo_pastoral",
            Self::Caballeros => "caballeros",
            Self::Otros => "otros",
        }
    }

    /// Display label for messages and printed statements.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Diezmo => "Diezmos",
            Self::Ofrenda => "Ofrendas",
            Self::Anexos => "Anexos",
            Self::Misiones => "Misiones",
            Self::LazosAmor => "Lazos de Amor",
            Self::MisionPosible => "Misión Posible",
            Self::Apy => "APY",
            Self::InstitutoBiblico => "Instituto Bíblico",
            Self::DiezmoPastoral => "Diezmo Pastoral",
            Self::Caballeros => "Caballeros",
            Self::Otros => "Otros",
        }
    }

    /// True for the buckets forming the congregational base (10% levy).
    #[must_use]
    pub const fn is_base_congregacional(self) -> bool {
        matches!(self, Self::Diezmo | Self::Ofrenda)
    }

    /// True for the buckets remitted to the national treasury in full, under
    /// the built-in policy.
    #[must_use]
    pub const fn default_remitido(self) -> bool {
        matches!(
            self,
            Self::Misiones
                | Self::LazosAmor
                | Self::MisionPosible
                | Self::Apy
                | Self::InstitutoBiblico
                | Self::DiezmoPastoral
                | Self::Caballeros
        )
    }
}

impl fmt::Display for FundBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FundBucket {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| PolicyError::UnknownBucket(s.to_string()))
    }
}

/// Category tag on an expense record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Electricity, water, connectivity.
    ServiciosPublicos,
    /// Building upkeep.
    Mantenimiento,
    /// Supplies and materials.
    Materiales,
    /// Non-pastoral honoraria (guest speakers, musicians).
    Honorarios,
    /// Everything else.
    Otros,
}

impl ExpenseCategory {
    /// All categories, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::ServiciosPublicos,
        Self::Mantenimiento,
        Self::Materiales,
        Self::Honorarios,
        Self::Otros,
    ];

    /// Snake-case name as stored in the expense records table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ServiciosPublicos => "servicios_publicos",
            Self::Mantenimiento => "mantenimiento",
            Self::Materiales => "materiales",
            Self::Honorarios => "honorarios",
            Self::Otros => "otros",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PolicyError::UnknownCategory(s.to_string()))
    }
}

/// Reconciliation classification for a church's month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    /// No income recorded; nothing to reconcile.
    SinEntradas,
    /// Entradas and salidas concile; the period may close.
    Balanceado,
    /// The numbers concile but the pastoral invoice is missing.
    PendienteFacturaPastoral,
    /// The registered pastoral invoice disagrees with the calculation.
    DiscrepanciaHonorarios,
    /// Salidas exceed available entradas.
    Deficit,
    /// Unassigned surplus remains.
    Superavit,
}

impl BalanceStatus {
    /// Snake-case name as stored on the reports row.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SinEntradas => "sin_entradas",
            Self::Balanceado => "balanceado",
            Self::PendienteFacturaPastoral => "pendiente_factura_pastoral",
            Self::DiscrepanciaHonorarios => "discrepancia_honorarios",
            Self::Deficit => "deficit",
            Self::Superavit => "superavit",
        }
    }

    /// Whether a period in this state may be closed.
    ///
    /// `force` overrides only `Deficit` and `Superavit`: an empty month has
    /// nothing to post, and a missing or wrong pastoral invoice must be fixed
    /// rather than forced through.
    #[must_use]
    pub const fn can_close(self, force: bool) -> bool {
        match self {
            Self::Balanceado => true,
            Self::Deficit | Self::Superavit => force,
            Self::SinEntradas | Self::PendienteFacturaPastoral | Self::DiscrepanciaHonorarios => {
                false
            }
        }
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BalanceStatus {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::SinEntradas,
            Self::Balanceado,
            Self::PendienteFacturaPastoral,
            Self::DiscrepanciaHonorarios,
            Self::Deficit,
            Self::Superavit,
        ]
        .into_iter()
        .find(|v| v.as_str() == s)
        .ok_or_else(|| PolicyError::UnknownStatus(s.to_string()))
    }
}

/// Error raised while parsing stored names or policy overrides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Unknown fund bucket name.
    #[error("unknown fund bucket: {0}")]
    UnknownBucket(String),
    /// Unknown expense category name.
    #[error("unknown expense category: {0}")]
    UnknownCategory(String),
    /// Unknown balance status name.
    #[error("unknown balance status: {0}")]
    UnknownStatus(String),
}

/// Deployment-level treasury policy.
///
/// The 10%-over-base vs 100%-remitted split is a business rule; the policy
/// only selects *which* buckets are fully remitted and an optional cap on the
/// calculated pastoral salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryPolicy {
    /// Buckets remitted to the national treasury in full.
    pub remitidos: BTreeSet<FundBucket>,
    /// Optional cap on the calculated pastoral salary.
    pub salario_pastoral_tope: Option<Decimal>,
}

impl Default for TreasuryPolicy {
    fn default() -> Self {
        Self {
            remitidos: FundBucket::ALL
                .into_iter()
                .filter(|b| b.default_remitido())
                .collect(),
            salario_pastoral_tope: None,
        }
    }
}

impl TreasuryPolicy {
    /// Builds a policy from deployment overrides.
    ///
    /// An empty override list keeps the built-in remitted set.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::UnknownBucket`] for unrecognized names.
    pub fn from_overrides(
        remitidos: &[String],
        salario_pastoral_tope: Option<Decimal>,
    ) -> Result<Self, PolicyError> {
        let remitidos = if remitidos.is_empty() {
            Self::default().remitidos
        } else {
            remitidos
                .iter()
                .map(|name| name.parse())
                .collect::<Result<BTreeSet<_>, _>>()?
        };

        Ok(Self {
            remitidos,
            salario_pastoral_tope,
        })
    }

    /// True when contributions in this bucket are remitted in full.
    #[must_use]
    pub fn is_remitido(&self, bucket: FundBucket) -> bool {
        self.remitidos.contains(&bucket)
    }
}

/// Summary of an existing reports row for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Reports row id.
    pub id: i32,
    /// Lifecycle state (`pendiente`, `procesado`, ...).
    pub estado: String,
    /// Stored balance classification, if the period was reconciled before.
    pub balance_status: Option<BalanceStatus>,
    /// When the period was closed, if it was.
    pub closed_at: Option<DateTime<Utc>>,
}

/// Pre-aggregated sums for one church and month, fed to the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyInput {
    /// Church id.
    pub church_id: i32,
    /// Church display name, used in concepts and messages.
    pub church_name: String,
    /// Month (1-12).
    pub month: u32,
    /// Year.
    pub year: i32,
    /// Contribution sums by bucket. Absent buckets mean zero.
    pub contribuciones: BTreeMap<FundBucket, Decimal>,
    /// Operating expense sums by category (pastoral honoraria excluded).
    pub gastos: BTreeMap<ExpenseCategory, Decimal>,
    /// Sum of expenses flagged as pastoral honoraria.
    pub honorarios_registrados: Decimal,
    /// Existing reports row for the period, if any.
    pub report: Option<ReportSummary>,
}

/// Income breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entradas {
    /// Tithes.
    pub diezmos: Decimal,
    /// Offerings.
    pub ofrendas: Decimal,
    /// Annex income (local).
    pub anexos: Decimal,
    /// Uncategorized local income.
    pub otros: Decimal,
    /// Designated (fully remitted) contributions by bucket.
    pub designados: BTreeMap<FundBucket, Decimal>,
    /// Total income.
    pub total: Decimal,
}

/// Automatic distribution between the national treasury and local funds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribucion {
    /// Congregational base (diezmos + ofrendas).
    pub base_congregacional: Decimal,
    /// 10% levy over the base, rounded to the whole guaraní.
    pub fondo_nacional_base: Decimal,
    /// Sum of fully-remitted designated contributions.
    pub fondo_nacional_designados: Decimal,
    /// Total owed to the national treasury.
    pub fondo_nacional_total: Decimal,
    /// What remains available locally.
    pub disponible_local: Decimal,
}

/// Expense summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GastosResumen {
    /// Operating expenses by category.
    pub por_categoria: BTreeMap<ExpenseCategory, Decimal>,
    /// Total operating expenses.
    pub operativos: Decimal,
    /// Registered pastoral honoraria.
    pub honorarios_registrados: Decimal,
    /// Total outflows (operating + honoraria).
    pub total_salidas: Decimal,
}

/// Calculated vs registered pastoral salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalarioPastoral {
    /// Residual salary the month supports (clamped at zero, optionally
    /// capped by policy).
    pub calculado: Decimal,
    /// Invoiced honoraria registered in the expense records.
    pub registrado: Decimal,
    /// `registrado - calculado`.
    pub diferencia: Decimal,
}

/// Reconciliation verdict for the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResumen {
    /// Income minus national levy, operating expenses, and calculated salary.
    pub saldo_calculado: Decimal,
    /// Classification driving closability.
    pub status: BalanceStatus,
    /// Whether the period may close without force.
    pub puede_cerrar: bool,
    /// Human-readable status line.
    pub mensaje: String,
    /// Actionable remediation steps for the current status.
    pub sugerencias: Vec<String>,
}

/// The monthly ledger view: the full reconciliation of one church's month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyLedger {
    /// Church id.
    pub church_id: i32,
    /// Church display name.
    pub church_name: String,
    /// Month (1-12).
    pub month: u32,
    /// Year.
    pub year: i32,
    /// Income breakdown.
    pub entradas: Entradas,
    /// National/local distribution.
    pub distribucion: Distribucion,
    /// Expense summary.
    pub gastos: GastosResumen,
    /// Pastoral salary comparison.
    pub salario_pastoral: SalarioPastoral,
    /// Reconciliation verdict.
    pub balance: BalanceResumen,
    /// Existing reports row for the period, if any.
    pub report: Option<ReportSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_round_trip() {
        for bucket in FundBucket::ALL {
            assert_eq!(bucket.as_str().parse::<FundBucket>().unwrap(), bucket);
        }
        assert!("fondo_secreto".parse::<FundBucket>().is_err());
    }

    #[test]
    fn test_category_round_trip() {
        for category in ExpenseCategory::ALL {
            assert_eq!(
                category.as_str().parse::<ExpenseCategory>().unwrap(),
                category
            );
        }
    }

    #[test]
    fn test_base_congregacional_is_only_diezmo_and_ofrenda() {
        let base: Vec<_> = FundBucket::ALL
            .into_iter()
            .filter(|b| b.is_base_congregacional())
            .collect();
        assert_eq!(base, vec![FundBucket::Diezmo, FundBucket::Ofrenda]);
    }

    #[test]
    fn test_default_policy_remits_seven_buckets() {
        let policy = TreasuryPolicy::default();
        assert_eq!(policy.remitidos.len(), 7);
        assert!(policy.is_remitido(FundBucket::Misiones));
        assert!(policy.is_remitido(FundBucket::DiezmoPastoral));
        assert!(!policy.is_remitido(FundBucket::Diezmo));
        assert!(!policy.is_remitido(FundBucket::Anexos));
        assert!(!policy.is_remitido(FundBucket::Otros));
    }

    #[test]
    fn test_policy_overrides() {
        let policy = TreasuryPolicy::from_overrides(
            &["misiones".to_string(), "apy".to_string()],
            None,
        )
        .unwrap();
        assert_eq!(policy.remitidos.len(), 2);
        assert!(policy.is_remitido(FundBucket::Apy));
        assert!(!policy.is_remitido(FundBucket::Caballeros));

        assert!(TreasuryPolicy::from_overrides(&["nada".to_string()], None).is_err());
    }

    #[test]
    fn test_can_close_matrix() {
        use BalanceStatus::*;
        for force in [false, true] {
            assert!(Balanceado.can_close(force));
            assert!(!SinEntradas.can_close(force));
            assert!(!PendienteFacturaPastoral.can_close(force));
            assert!(!DiscrepanciaHonorarios.can_close(force));
        }
        assert!(!Deficit.can_close(false));
        assert!(Deficit.can_close(true));
        assert!(!Superavit.can_close(false));
        assert!(Superavit.can_close(true));
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&BalanceStatus::PendienteFacturaPastoral).unwrap(),
            "\"pendiente_factura_pastoral\""
        );
    }
}
