//! `SeaORM` Entity for worship contribution line items.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::FundBucket;

/// One contribution within a worship record, tagged with its fund bucket.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "worship_contributions")]
pub struct Model {
    /// Autoincrement id.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The worship record this line belongs to.
    pub worship_record_id: i32,
    /// Donor reference, when the giver is registered.
    pub donor_id: Option<i32>,
    /// Free-form donor name for unregistered givers.
    pub donor_name: Option<String>,
    /// Routing bucket.
    pub fund_bucket: FundBucket,
    /// Contribution amount.
    pub amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The worship record this line belongs to.
    #[sea_orm(
        belongs_to = "super::worship_records::Entity",
        from = "Column::WorshipRecordId",
        to = "super::worship_records::Column::Id"
    )]
    WorshipRecords,
}

impl Related<super::worship_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorshipRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
