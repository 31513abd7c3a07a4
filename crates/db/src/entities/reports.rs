//! `SeaORM` Entity for the monthly reports table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ReportStatus;

/// The monthly declaration for one church.
///
/// At most one row per `(church_id, month, year)`; the period closer and the
/// report generator both upsert against that key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    /// Autoincrement id.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Declaring church.
    pub church_id: i32,
    /// Month (1-12).
    pub month: i32,
    /// Year.
    pub year: i32,
    /// Tithes.
    pub diezmos: Decimal,
    /// Offerings.
    pub ofrendas: Decimal,
    /// Annex congregation income.
    pub anexos: Decimal,
    /// Uncategorized local income.
    pub otros: Decimal,
    /// Missions offering (remitted in full).
    pub misiones: Decimal,
    /// "Lazos de Amor" campaign (remitted in full).
    pub lazos_amor: Decimal,
    /// "Misión Posible" campaign (remitted in full).
    pub mision_posible: Decimal,
    /// National youth association (remitted in full).
    pub apy: Decimal,
    /// Bible institute support (remitted in full).
    pub instituto_biblico: Decimal,
    /// Pastor's own tithe (remitted in full).
    pub diezmo_pastoral: Decimal,
    /// Men's ministry (remitted in full).
    pub caballeros: Decimal,
    /// Total income.
    pub total_entradas: Decimal,
    /// Total owed to the national treasury.
    pub fondo_nacional: Decimal,
    /// Registered pastoral honoraria.
    pub honorarios_pastoral: Decimal,
    /// Operating expenses.
    pub gastos_operativos: Decimal,
    /// Total outflows.
    pub total_salidas: Decimal,
    /// Month saldo (income − national − expenses − calculated salary).
    pub saldo_mes: Decimal,
    /// Lifecycle state.
    pub estado: ReportStatus,
    /// Reconciliation classification at last processing.
    pub balance_status: Option<String>,
    /// Saldo recorded when the period was processed.
    pub balance_delta: Decimal,
    /// When the period was closed.
    pub closed_at: Option<DateTimeWithTimeZone>,
    /// Who closed the period.
    pub closed_by: Option<String>,
    /// Who submitted the declaration.
    pub submitted_by: Option<String>,
    /// When the declaration was submitted.
    pub submitted_at: Option<DateTimeWithTimeZone>,
    /// Who processed the declaration nationally.
    pub processed_by: Option<String>,
    /// When the declaration was processed.
    pub processed_at: Option<DateTimeWithTimeZone>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The declaring church.
    #[sea_orm(
        belongs_to = "super::churches::Entity",
        from = "Column::ChurchId",
        to = "super::churches::Column::Id"
    )]
    Churches,
    /// System-generated transactions tied to this report.
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::churches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Churches.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
