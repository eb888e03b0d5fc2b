//! Capacity and occupancy math for a single event layout.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A placed seat together with what its catalog entry says about it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatCapacity {
    pub seat_id: Uuid,
    pub seat_number: String,
    pub seating_type_id: Uuid,
    /// `None` when the catalog entry could not be resolved
    pub type_name: Option<String>,
    pub capacity: Option<i32>,
}

/// One active reservation as reported by the reservation ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveReservation {
    pub seat_id: Uuid,
    pub people_count: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatOccupancyStatus {
    Full,
    Available,
}

/// Occupancy of one seat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatOccupancy {
    pub seat_id: Uuid,
    pub seat_number: String,
    pub capacity: i32,
    pub reserved_people: i64,
    pub active_reservations: usize,
    pub status: SeatOccupancyStatus,
    /// Set when the seat's catalog entry is missing; its capacity counts as 0
    pub unresolved_type: bool,
}

/// Per seating type rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub seating_type_id: Uuid,
    pub name: Option<String>,
    pub seat_count: usize,
    pub total_capacity: i64,
    pub reserved_seats: usize,
    pub available_seats: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyReport {
    pub total_seats: usize,
    pub total_capacity: i64,
    /// Seats holding at least one active reservation
    pub reserved_seats: usize,
    pub reserved_people: i64,
    /// People that can still be seated. Negative when the event is overbooked.
    pub available_seats: i64,
    pub occupancy_rate_pct: f64,
    pub seats: Vec<SeatOccupancy>,
    pub by_type: Vec<TypeSummary>,
}

impl OccupancyReport {
    /// Builds the report from the layout's seats and the ledger's active
    /// reservations. Reservations for seats outside the layout are ignored.
    pub fn compute(seats: &[SeatCapacity], reservations: &[ActiveReservation]) -> Self {
        let mut people_by_seat: HashMap<Uuid, (i64, usize)> = HashMap::new();
        for reservation in reservations {
            let entry = people_by_seat.entry(reservation.seat_id).or_default();
            entry.0 += i64::from(reservation.people_count);
            entry.1 += 1;
        }

        let mut total_capacity = 0i64;
        let mut reserved_people = 0i64;
        let mut reserved_seats = 0usize;
        let mut seat_rows = Vec::with_capacity(seats.len());
        let mut by_type: Vec<TypeSummary> = Vec::new();

        for seat in seats {
            let capacity = seat.capacity.unwrap_or(0);
            let (people, count) = people_by_seat.get(&seat.seat_id).copied().unwrap_or((0, 0));

            total_capacity += i64::from(capacity);
            reserved_people += people;
            if count > 0 {
                reserved_seats += 1;
            }

            let status = if count > 0 && people >= i64::from(capacity) {
                SeatOccupancyStatus::Full
            } else {
                SeatOccupancyStatus::Available
            };

            seat_rows.push(SeatOccupancy {
                seat_id: seat.seat_id,
                seat_number: seat.seat_number.clone(),
                capacity,
                reserved_people: people,
                active_reservations: count,
                status,
                unresolved_type: seat.capacity.is_none(),
            });

            // Linear scan keeps first-seen order; layouts reference a handful of types
            let idx = match by_type
                .iter()
                .position(|s| s.seating_type_id == seat.seating_type_id)
            {
                Some(idx) => idx,
                None => {
                    by_type.push(TypeSummary {
                        seating_type_id: seat.seating_type_id,
                        name: seat.type_name.clone(),
                        seat_count: 0,
                        total_capacity: 0,
                        reserved_seats: 0,
                        available_seats: 0,
                    });
                    by_type.len() - 1
                }
            };

            let summary = &mut by_type[idx];
            summary.seat_count += 1;
            summary.total_capacity += i64::from(capacity);
            if count > 0 {
                summary.reserved_seats += 1;
            } else {
                summary.available_seats += 1;
            }
        }

        Self {
            total_seats: seats.len(),
            total_capacity,
            reserved_seats,
            reserved_people,
            available_seats: total_capacity - reserved_people,
            occupancy_rate_pct: occupancy_rate(reserved_people, total_capacity),
            seats: seat_rows,
            by_type,
        }
    }
}

/// Percentage rounded to two decimals, 0 for an empty layout
pub fn occupancy_rate(reserved_people: i64, total_capacity: i64) -> f64 {
    if total_capacity == 0 {
        return 0.0;
    }

    let pct = reserved_people as f64 / total_capacity as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
