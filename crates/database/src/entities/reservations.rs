use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status of a reservation that still holds its seat
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Reservation ledger rows. Owned by the booking side; only ever read here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub event_id: Uuid,
    pub seating_id: Option<Uuid>,
    pub phone: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub reservation_code: String,
    pub number_of_people: i32,
    pub status: String, // active, cancelled
    pub checked_in: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
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
        belongs_to = "super::event_seatings::Entity",
        from = "Column::SeatingId",
        to = "super::event_seatings::Column::Id"
    )]
    EventSeating,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::event_seatings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventSeating.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
