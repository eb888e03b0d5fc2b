use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A tenant
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::events::Entity")]
    Events,
    #[sea_orm(has_many = "super::seating_types::Entity")]
    SeatingTypes,
    #[sea_orm(has_many = "super::seating_layout_templates::Entity")]
    SeatingLayoutTemplates,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::seating_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeatingTypes.def()
    }
}

impl Related<super::seating_layout_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeatingLayoutTemplates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
