//! `SeaORM` Entity for the churches table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A local congregation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "churches")]
pub struct Model {
    /// Autoincrement id.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Congregation name.
    pub name: String,
    /// City.
    pub city: String,
    /// Pastor in charge.
    pub pastor: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Inactive churches are kept for their history.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Monthly reports declared by this church.
    #[sea_orm(has_many = "super::reports::Entity")]
    Reports,
    /// Worship records captured by this church.
    #[sea_orm(has_many = "super::worship_records::Entity")]
    WorshipRecords,
    /// Expense records captured by this church.
    #[sea_orm(has_many = "super::expense_records::Entity")]
    ExpenseRecords,
    /// Fund transactions attributed to this church.
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl Related<super::worship_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorshipRecords.def()
    }
}

impl Related<super::expense_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseRecords.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
