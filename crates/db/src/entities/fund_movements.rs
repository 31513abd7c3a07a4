//! `SeaORM` Entity for the fund movement audit log.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only balance movement row: one per posting, one per reversal.
///
/// `transaction_id` is NULL for reversal rows (the transaction is gone) and
/// for manual balance seeding. Rows are never updated or deleted
/// independently of their transaction.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fund_movements_enhanced")]
pub struct Model {
    /// Autoincrement id.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The fund whose balance moved.
    pub fund_id: i32,
    /// Originating transaction, when it still exists.
    pub transaction_id: Option<i32>,
    /// Balance before the movement.
    pub previous_balance: Decimal,
    /// Signed delta.
    pub movement: Decimal,
    /// Balance after the movement.
    pub new_balance: Decimal,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The fund whose balance moved.
    #[sea_orm(
        belongs_to = "super::funds::Entity",
        from = "Column::FundId",
        to = "super::funds::Column::Id"
    )]
    Funds,
    /// The originating transaction.
    #[sea_orm(
        belongs_to = "super::transactions::Entity",
        from = "Column::TransactionId",
        to = "super::transactions::Column::Id"
    )]
    Transactions,
}

impl Related<super::funds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Funds.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
