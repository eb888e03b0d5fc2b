use crate::{
    entities::{event_seatings, layouts, seating_types},
    error::LayoutError,
    services::{begin_snapshot, ledger::ReservationLedger},
};
use models::occupancy::{OccupancyReport, SeatCapacity};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct OccupancyService;

impl OccupancyService {
    /// Capacity and occupancy of one event's layout.
    ///
    /// Seats and reservations are read in one snapshot, so a concurrent
    /// layout save is either fully visible or not at all.
    pub async fn compute(
        db: &DatabaseConnection,
        event_id: Uuid,
    ) -> Result<OccupancyReport, LayoutError> {
        let txn = begin_snapshot(db).await?;

        let layout = layouts::Entity::find_by_id(event_id).one(&txn).await?;
        if layout.is_none() {
            return Err(LayoutError::NotFound("event"));
        }

        let seats: Vec<SeatCapacity> = event_seatings::Entity::find()
            .filter(event_seatings::Column::EventId.eq(event_id))
            .order_by_asc(event_seatings::Column::SeatNumber)
            .find_also_related(seating_types::Entity)
            .all(&txn)
            .await?
            .into_iter()
            .map(|(seat, seating_type)| SeatCapacity {
                seat_id: seat.id,
                seat_number: seat.seat_number,
                seating_type_id: seat.seating_type_id,
                type_name: seating_type.as_ref().map(|t| t.name.clone()),
                capacity: seating_type.map(|t| t.capacity),
            })
            .collect();

        let seat_ids: Vec<Uuid> = seats.iter().map(|seat| seat.seat_id).collect();
        let reservations =
            ReservationLedger::list_active_reservations_for_seats(&txn, &seat_ids).await?;
        txn.commit().await?;

        Ok(OccupancyReport::compute(&seats, &reservations))
    }
}
