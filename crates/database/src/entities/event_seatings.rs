use models::{
    layout::{SeatDraft, SeatStatus},
    template::SeatDescriptor,
};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A seat placed on an event's layout
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_seatings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub event_id: Uuid,
    pub seating_type_id: Uuid,
    pub seat_number: String, // e.g. "M001"
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub color_code: Option<String>,
    pub status: SeatStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    /// The draft that would save this seat unchanged
    pub fn to_draft(&self) -> SeatDraft {
        SeatDraft {
            id: Some(self.id),
            seating_type_id: self.seating_type_id,
            seat_number: self.seat_number.clone(),
            position_x: self.position_x,
            position_y: self.position_y,
            width: self.width,
            height: self.height,
            color_code: self.color_code.clone(),
        }
    }

    pub fn to_descriptor(&self) -> SeatDescriptor {
        SeatDescriptor::from(&self.to_draft())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::seating_types::Entity",
        from = "Column::SeatingTypeId",
        to = "super::seating_types::Column::Id"
    )]
    SeatingType,
    #[sea_orm(has_many = "super::reservations::Entity")]
    Reservations,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::seating_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeatingType.def()
    }
}

impl Related<super::reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
