use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    /// Template the current layout was applied from, kept for provenance only
    pub seating_layout_template_id: Option<Uuid>,
    pub name: String,
    pub event_date: Date,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Company,
    #[sea_orm(
        belongs_to = "super::seating_layout_templates::Entity",
        from = "Column::SeatingLayoutTemplateId",
        to = "super::seating_layout_templates::Column::Id"
    )]
    SeatingLayoutTemplate,
    #[sea_orm(has_one = "super::layouts::Entity")]
    Layout,
    #[sea_orm(has_many = "super::event_seatings::Entity")]
    EventSeatings,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::seating_layout_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeatingLayoutTemplate.def()
    }
}

impl Related<super::layouts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Layout.def()
    }
}

impl Related<super::event_seatings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventSeatings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
