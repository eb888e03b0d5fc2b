use models::seating_type::ShapeClass;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A seating catalog entry of one tenant
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seating_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub shape: ShapeClass,
    pub capacity: i32,
    pub color_code: String,
    pub icon: String,
    /// Seeded from the built-in catalog when the tenant was provisioned
    pub is_default: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Company,
    #[sea_orm(has_many = "super::event_seatings::Entity")]
    EventSeatings,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::event_seatings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventSeatings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
