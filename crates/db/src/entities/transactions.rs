//! `SeaORM` Entity for the transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A fund ledger entry: one fund, one signed amount, one balance snapshot.
///
/// Rows are immutable except for a narrow cosmetic allow-list (`concept`,
/// `provider`, `document_number`). Deletion reverses the fund balance.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Autoincrement id.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Accounting date.
    pub date: Date,
    /// Originating church, when attributable.
    pub church_id: Option<i32>,
    /// Report this transaction was generated for, when system-generated.
    pub report_id: Option<i32>,
    /// The fund this entry moves.
    pub fund_id: i32,
    /// Ledger concept line.
    pub concept: String,
    /// Supplier, for expense entries.
    pub provider: Option<String>,
    /// Invoice or receipt number.
    pub document_number: Option<String>,
    /// Credit amount (exclusive with `amount_out`).
    pub amount_in: Decimal,
    /// Debit amount (exclusive with `amount_in`).
    pub amount_out: Decimal,
    /// Fund balance snapshot after this entry was posted.
    pub balance: Decimal,
    /// Who posted the entry (`system` for report auto-postings).
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The fund this entry moves.
    #[sea_orm(
        belongs_to = "super::funds::Entity",
        from = "Column::FundId",
        to = "super::funds::Column::Id"
    )]
    Funds,
    /// The originating church.
    #[sea_orm(
        belongs_to = "super::churches::Entity",
        from = "Column::ChurchId",
        to = "super::churches::Column::Id"
    )]
    Churches,
    /// The report this entry was generated for.
    #[sea_orm(
        belongs_to = "super::reports::Entity",
        from = "Column::ReportId",
        to = "super::reports::Column::Id"
    )]
    Reports,
    /// Balance movement audit rows.
    #[sea_orm(has_many = "super::fund_movements::Entity")]
    FundMovements,
}

impl Related<super::funds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Funds.def()
    }
}

impl Related<super::churches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Churches.def()
    }
}

impl Related<super::reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl Related<super::fund_movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FundMovements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
