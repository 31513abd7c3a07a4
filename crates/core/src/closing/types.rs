//! Closing domain types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::totals::BalanceStatus;

/// Fund classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundType {
    /// The national treasury fund.
    Nacional,
    /// Designated-purpose funds.
    Designado,
    /// Construction campaigns.
    Construccion,
    /// Mission funds.
    Misionero,
    /// Special campaigns.
    Especial,
    /// Charitable works.
    ObrasBeneficas,
    /// Education funds.
    Educativo,
    /// Everything else, including church operating funds.
    Otro,
}

impl FundType {
    /// Snake-case name as stored in the funds table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nacional => "nacional",
            Self::Designado => "designado",
            Self::Construccion => "construccion",
            Self::Misionero => "misionero",
            Self::Especial => "especial",
            Self::ObrasBeneficas => "obras_beneficas",
            Self::Educativo => "educativo",
            Self::Otro => "otro",
        }
    }
}

impl fmt::Display for FundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FundType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Nacional,
            Self::Designado,
            Self::Construccion,
            Self::Misionero,
            Self::Especial,
            Self::ObrasBeneficas,
            Self::Educativo,
            Self::Otro,
        ]
        .into_iter()
        .find(|v| v.as_str() == s)
        .ok_or_else(|| format!("unknown fund type: {s}"))
    }
}

/// One fund transaction a close or report submission must post.
///
/// The executor resolves `fund_name` through get-or-create, then posts the
/// amounts with system origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTransfer {
    /// Destination fund, created lazily if absent.
    pub fund_name: String,
    /// Type assigned when the fund is created.
    pub fund_type: FundType,
    /// Ledger concept line.
    pub concept: String,
    /// Credit amount (exclusive with `amount_out`).
    pub amount_in: Decimal,
    /// Debit amount (exclusive with `amount_in`).
    pub amount_out: Decimal,
}

/// Why a close attempt was rejected, with remediation guidance.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("period cannot be closed ({status}): {mensaje}")]
pub struct CloseRejection {
    /// The blocking classification.
    pub status: BalanceStatus,
    /// Human-readable status line.
    pub mensaje: String,
    /// Actionable remediation steps.
    pub sugerencias: Vec<String>,
}
