//! `SeaORM` Entity for expense records.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ExpenseCategory;

/// One outflow recorded by a church.
///
/// `es_honorario_pastoral` routes the amount into the pastoral honoraria
/// total instead of generic operating expenses.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_records")]
pub struct Model {
    /// Autoincrement id.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The church that paid.
    pub church_id: i32,
    /// Expense date.
    pub fecha: Date,
    /// What was paid for.
    pub concepto: String,
    /// Expense category.
    pub categoria: ExpenseCategory,
    /// Supplier.
    pub proveedor: Option<String>,
    /// Invoice or receipt number.
    pub numero_documento: Option<String>,
    /// Expense amount.
    pub monto: Decimal,
    /// True when this is the pastor's honorarium invoice.
    pub es_honorario_pastoral: bool,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The church that paid.
    #[sea_orm(
        belongs_to = "super::churches::Entity",
        from = "Column::ChurchId",
        to = "super::churches::Column::Id"
    )]
    Churches,
}

impl Related<super::churches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Churches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
