//! Read side of the reservation ledger.
//!
//! Reservations are written by the booking flow. The seating core only asks
//! which seats still carry an active reservation and for how many people.

use crate::entities::reservations::{self, STATUS_ACTIVE};
use models::occupancy::ActiveReservation;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use std::collections::HashSet;
use uuid::Uuid;

pub struct ReservationLedger;

impl ReservationLedger {
    pub async fn list_active_reservations_for_seats<C: ConnectionTrait>(
        db: &C,
        seat_ids: &[Uuid],
    ) -> Result<Vec<ActiveReservation>, DbErr> {
        if seat_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = reservations::Entity::find()
            .filter(reservations::Column::SeatingId.is_in(seat_ids.iter().copied()))
            .filter(reservations::Column::Status.eq(STATUS_ACTIVE))
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                row.seating_id.map(|seat_id| ActiveReservation {
                    seat_id,
                    people_count: row.number_of_people,
                })
            })
            .collect())
    }

    pub async fn has_active_reservation<C: ConnectionTrait>(
        db: &C,
        seat_id: Uuid,
    ) -> Result<bool, DbErr> {
        let count = reservations::Entity::find()
            .filter(reservations::Column::SeatingId.eq(seat_id))
            .filter(reservations::Column::Status.eq(STATUS_ACTIVE))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// The subset of `seat_ids` holding at least one active reservation
    pub async fn reserved_seats<C: ConnectionTrait>(
        db: &C,
        seat_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, DbErr> {
        Ok(Self::list_active_reservations_for_seats(db, seat_ids)
            .await?
            .into_iter()
            .map(|reservation| reservation.seat_id)
            .collect())
    }
}
