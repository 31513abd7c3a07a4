//! Active enums shared by the entity definitions.
//!
//! These mirror the pure domain enums in `tesoreria-core`; the `From`
//! impls map between the persistence and domain representations at the
//! repository boundary.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fund classification, as stored in `funds.fund_type`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum FundType {
    /// The national treasury fund.
    #[sea_orm(string_value = "nacional")]
    Nacional,
    /// Designated-purpose funds.
    #[sea_orm(string_value = "designado")]
    Designado,
    /// Construction campaigns.
    #[sea_orm(string_value = "construccion")]
    Construccion,
    /// Mission funds.
    #[sea_orm(string_value = "misionero")]
    Misionero,
    /// Special campaigns.
    #[sea_orm(string_value = "especial")]
    Especial,
    /// Charitable works.
    #[sea_orm(string_value = "obras_beneficas")]
    ObrasBeneficas,
    /// Education funds.
    #[sea_orm(string_value = "educativo")]
    Educativo,
    /// Everything else, including church operating funds.
    #[sea_orm(string_value = "otro")]
    Otro,
}

/// Report lifecycle state, as stored in `reports.estado`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Submitted, awaiting national processing.
    #[sea_orm(string_value = "pendiente")]
    Pendiente,
    /// Processed by a period close.
    #[sea_orm(string_value = "procesado")]
    Procesado,
    /// Approved by the national treasury.
    #[sea_orm(string_value = "aprobado")]
    Aprobado,
    /// Rejected by the national treasury.
    #[sea_orm(string_value = "rechazado")]
    Rechazado,
    /// Deleted; the period is re-opened.
    #[sea_orm(string_value = "eliminado")]
    Eliminado,
}

/// Contribution bucket, as stored in `worship_contributions.fund_bucket`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum FundBucket {
    /// Tithe.
    #[sea_orm(string_value = "diezmo")]
    Diezmo,
    /// General offering.
    #[sea_orm(string_value = "ofrenda")]
    Ofrenda,
    /// Annex congregation income.
    #[sea_orm(string_value = "anexos")]
    Anexos,
    /// Missions offering.
    #[sea_orm(string_value = "misiones")]
    Misiones,
    /// "Lazos de Amor" campaign.
    #[sea_orm(string_value = "lazos_amor")]
    LazosAmor,
    /// "Misión Posible" campaign.
    #[sea_orm(string_value = "mision_posible")]
    MisionPosible,
    /// National youth association.
    #[sea_orm(string_value = "apy")]
    Apy,
    /// Bible institute support.
    #[sea_orm(string_value = "instituto_biblico")]
    InstitutoBiblico,
    /// Pastor's own tithe.
    #[sea_orm(string_value = "diezmo_pastoral")]
    DiezmoPastoral,
    /// Men's ministry.
    #[sea_orm(string_value = "caballeros")]
    Caballeros,
    /// Anything else.
    #[sea_orm(string_value = "otros")]
    Otros,
}

/// Expense category, as stored in `expense_records.categoria`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Electricity, water, connectivity.
    #[sea_orm(string_value = "servicios_publicos")]
    ServiciosPublicos,
    /// Building upkeep.
    #[sea_orm(string_value = "mantenimiento")]
    Mantenimiento,
    /// Supplies and materials.
    #[sea_orm(string_value = "materiales")]
    Materiales,
    /// Non-pastoral honoraria.
    #[sea_orm(string_value = "honorarios")]
    Honorarios,
    /// Everything else.
    #[sea_orm(string_value = "otros")]
    Otros,
}

impl From<FundBucket> for tesoreria_core::totals::FundBucket {
    fn from(value: FundBucket) -> Self {
        match value {
            FundBucket::Diezmo => Self::Diezmo,
            FundBucket::Ofrenda => Self::Ofrenda,
            FundBucket::Anexos => Self::Anexos,
            FundBucket::Misiones => Self::Misiones,
            FundBucket::LazosAmor => Self::LazosAmor,
            FundBucket::MisionPosible => Self::MisionPosible,
            FundBucket::Apy => Self::Apy,
            FundBucket::InstitutoBiblico => Self::InstitutoBiblico,
            FundBucket::DiezmoPastoral => Self::DiezmoPastoral,
            FundBucket::Caballeros => Self::Caballeros,
            FundBucket::Otros => Self::Otros,
        }
    }
}

impl From<tesoreria_core::totals::FundBucket> for FundBucket {
    fn from(value: tesoreria_core::totals::FundBucket) -> Self {
        use tesoreria_core::totals::FundBucket as Core;
        match value {
            Core::Diezmo => Self::Diezmo,
            Core::Ofrenda => Self::Ofrenda,
            Core::Anexos => Self::Anexos,
            Core::Misiones => Self::Misiones,
            Core::LazosAmor => Self::LazosAmor,
            Core::MisionPosible => Self::MisionPosible,
            Core::Apy => Self::Apy,
            Core::InstitutoBiblico => Self::InstitutoBiblico,
            Core::DiezmoPastoral => Self::DiezmoPastoral,
            Core::Caballeros => Self::Caballeros,
            Core::Otros => Self::Otros,
        }
    }
}

impl From<ExpenseCategory> for tesoreria_core::totals::ExpenseCategory {
    fn from(value: ExpenseCategory) -> Self {
        match value {
            ExpenseCategory::ServiciosPublicos => Self::ServiciosPublicos,
            ExpenseCategory::Mantenimiento => Self::Mantenimiento,
            ExpenseCategory::Materiales => Self::Materiales,
            ExpenseCategory::Honorarios => Self::Honorarios,
            ExpenseCategory::Otros => Self::Otros,
        }
    }
}

impl From<tesoreria_core::closing::FundType> for FundType {
    fn from(value: tesoreria_core::closing::FundType) -> Self {
        use tesoreria_core::closing::FundType as Core;
        match value {
            Core::Nacional => Self::Nacional,
            Core::Designado => Self::Designado,
            Core::Construccion => Self::Construccion,
            Core::Misionero => Self::Misionero,
            Core::Especial => Self::Especial,
            Core::ObrasBeneficas => Self::ObrasBeneficas,
            Core::Educativo => Self::Educativo,
            Core::Otro => Self::Otro,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_mapping_round_trip() {
        use sea_orm::Iterable;

        for bucket in FundBucket::iter() {
            let core: tesoreria_core::totals::FundBucket = bucket.clone().into();
            let back: FundBucket = core.into();
            assert_eq!(bucket, back);
        }
    }

    #[test]
    fn test_bucket_storage_names_match_core() {
        use sea_orm::{ActiveEnum, Iterable};

        for bucket in FundBucket::iter() {
            let core: tesoreria_core::totals::FundBucket = bucket.clone().into();
            assert_eq!(bucket.to_value(), core.as_str());
        }
    }
}
