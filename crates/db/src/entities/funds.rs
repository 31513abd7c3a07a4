//! `SeaORM` Entity for the funds table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::FundType;

/// A named bucket of money with a running balance.
///
/// `current_balance` always equals the sum of every movement posted against
/// the fund; it is mutated only by the transaction poster, under a row lock.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "funds")]
pub struct Model {
    /// Autoincrement id.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Unique fund name; the lazy get-or-create key.
    #[sea_orm(unique)]
    pub name: String,
    /// Fund classification.
    pub fund_type: FundType,
    /// Free-form description.
    pub description: Option<String>,
    /// Running balance, reconstructable from the movement log.
    pub current_balance: Decimal,
    /// Funds with history are deactivated, never deleted.
    pub is_active: bool,
    /// Who created the fund (`system` for lazy creation).
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Transactions posted against this fund.
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
    /// Balance movement audit rows.
    #[sea_orm(has_many = "super::fund_movements::Entity")]
    FundMovements,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::fund_movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FundMovements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
