//! `SeaORM` Entity for worship service records.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One worship service and what it collected.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "worship_records")]
pub struct Model {
    /// Autoincrement id.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The church that held the service.
    pub church_id: i32,
    /// Service date.
    pub fecha_culto: Date,
    /// Service kind (dominical, oración, especial, ...).
    pub tipo_culto: Option<String>,
    /// Sum of the service's contributions, denormalized for listings.
    pub total_recaudado: Decimal,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The church that held the service.
    #[sea_orm(
        belongs_to = "super::churches::Entity",
        from = "Column::ChurchId",
        to = "super::churches::Column::Id"
    )]
    Churches,
    /// Line-item contributions.
    #[sea_orm(has_many = "super::worship_contributions::Entity")]
    WorshipContributions,
}

impl Related<super::churches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Churches.def()
    }
}

impl Related<super::worship_contributions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorshipContributions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
