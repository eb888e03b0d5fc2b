#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use migration::{Migrator, MigratorTrait};
use models::layout::{LayoutMetadata, SeatDraft};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectOptions, Database, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter,
};
use seating_database::{
    entities::{companies, event_seatings, events, reservations, seating_types},
    services::{event::EventService, tenant::TenantService},
};
use uuid::Uuid;

/// A fresh, migrated in-memory database.
///
/// The pool holds a single connection: every in-memory SQLite connection is
/// its own database.
pub async fn setup() -> DatabaseConnection {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub struct Fixture {
    pub db: DatabaseConnection,
    pub company: companies::Model,
    pub event: events::Model,
    /// "Table for 4"
    pub table: Uuid,
    /// "Single Chair"
    pub chair: Uuid,
}

/// A provisioned tenant with one event on the default 800x600 canvas
pub async fn fixture() -> Fixture {
    let db = setup().await;
    let company = TenantService::provision(&db, "Grand Hall").await.unwrap();
    let event = create_event(&db, company.id, "Spring Gala").await;
    let table = type_id(&db, company.id, "Table for 4").await;
    let chair = type_id(&db, company.id, "Single Chair").await;

    Fixture {
        db,
        company,
        event,
        table,
        chair,
    }
}

pub async fn create_event(db: &DatabaseConnection, company_id: Uuid, name: &str) -> events::Model {
    let date = NaiveDate::from_ymd_opt(2026, 5, 23).unwrap();
    EventService::create_event(db, company_id, name, date)
        .await
        .unwrap()
}

pub async fn type_id(db: &DatabaseConnection, company_id: Uuid, name: &str) -> Uuid {
    seating_types::Entity::find()
        .filter(seating_types::Column::CompanyId.eq(company_id))
        .filter(seating_types::Column::Name.eq(name))
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .id
}

/// Three tables M1..M3 and two chairs K1, K2, none overlapping
pub fn scenario_seats(table: Uuid, chair: Uuid) -> Vec<SeatDraft> {
    vec![
        SeatDraft::new(table, "M1", 40.0, 100.0),
        SeatDraft::new(table, "M2", 140.0, 100.0),
        SeatDraft::new(table, "M3", 240.0, 100.0),
        SeatDraft::new(chair, "K1", 40.0, 300.0),
        SeatDraft::new(chair, "K2", 140.0, 300.0),
    ]
}

pub fn default_metadata() -> LayoutMetadata {
    LayoutMetadata::default()
}

pub async fn seat(db: &DatabaseConnection, event_id: Uuid, label: &str) -> event_seatings::Model {
    event_seatings::Entity::find()
        .filter(event_seatings::Column::EventId.eq(event_id))
        .filter(event_seatings::Column::SeatNumber.eq(label))
        .one(db)
        .await
        .unwrap()
        .unwrap()
}

/// Writes an active reservation the way the booking flow would
pub async fn book(
    db: &DatabaseConnection,
    event_id: Uuid,
    seat_id: Uuid,
    people: i32,
) -> reservations::Model {
    let now = Utc::now().naive_utc();
    let id = Uuid::new_v4();

    reservations::ActiveModel {
        id: Set(id),
        event_id: Set(event_id),
        seating_id: Set(Some(seat_id)),
        phone: Set("5551234567".to_string()),
        first_name: Set(Some("Ada".to_string())),
        last_name: Set(None),
        reservation_code: Set(format!("RES-{id}")),
        number_of_people: Set(people),
        status: Set(reservations::STATUS_ACTIVE.to_string()),
        checked_in: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn cancel(db: &DatabaseConnection, reservation: reservations::Model) {
    let mut reservation = reservation.into_active_model();
    reservation.status = Set(reservations::STATUS_CANCELLED.to_string());
    reservation.update(db).await.unwrap();
}

/// (type, label, x, y, width, height, color) of every seat, sorted by label
pub fn seat_shapes(
    seats: &[event_seatings::Model],
) -> Vec<(Uuid, String, f64, f64, f64, f64, Option<String>)> {
    let mut shapes: Vec<_> = seats
        .iter()
        .map(|s| {
            (
                s.seating_type_id,
                s.seat_number.clone(),
                s.position_x,
                s.position_y,
                s.width,
                s.height,
                s.color_code.clone(),
            )
        })
        .collect();
    shapes.sort_by(|a, b| a.1.cmp(&b.1));
    shapes
}
