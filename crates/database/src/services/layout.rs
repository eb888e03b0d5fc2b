//! The layout store: one event's canvas settings and placed seats.
//!
//! Writers lock the event's `layouts` row before touching its seats, so two
//! saves for the same event never interleave. A save replaces the whole seat
//! set; drafts that carry the id of an existing seat keep that seat's
//! identity and status.

use crate::{
    entities::{event_seatings, events, layouts, seating_types},
    error::LayoutError,
    services::{begin_snapshot, catalog::CatalogService, ledger::ReservationLedger, now},
};
use log::{debug, info, warn};
use models::{
    geometry::snap_to_grid,
    layout::{DEFAULT_SEAT_WIDTH, LayoutMetadata, SeatDraft, SeatStatus},
    validation::{LayoutLimits, validate_layout},
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{Set, Unchanged},
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Most seats a single `add_seats` call may place
pub const MAX_ADDED_SEATS: usize = 999;

/// A read-only view of one event's layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub event_id: Uuid,
    pub metadata: LayoutMetadata,
    /// Ordered by label
    pub seats: Vec<event_seatings::Model>,
}

/// Result of a successful save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSaved {
    pub seat_count: usize,
    /// Advisory findings such as overlapping seats, never blocking
    pub warnings: Vec<String>,
}

pub struct LayoutService;

impl LayoutService {
    /// Validates and atomically swaps in a complete layout for the event
    pub async fn replace_layout(
        db: &DatabaseConnection,
        event_id: Uuid,
        metadata: &LayoutMetadata,
        seats: &[SeatDraft],
        limits: &LayoutLimits,
    ) -> Result<LayoutSaved, LayoutError> {
        let txn = db.begin().await?;

        match Self::replace_layout_in(&txn, event_id, metadata, seats, limits).await {
            Ok(saved) => {
                txn.commit().await?;
                info!(
                    "Saved layout for event {event_id}: {} seats, {} warnings",
                    saved.seat_count,
                    saved.warnings.len()
                );
                Ok(saved)
            }
            Err(e) => {
                txn.rollback().await?;
                warn!("Layout for event {event_id} rejected: {e}");
                Err(e)
            }
        }
    }

    /// Body of [`Self::replace_layout`] for callers that already hold a
    /// transaction. Nothing is visible to other connections until the caller
    /// commits.
    pub async fn replace_layout_in<C: ConnectionTrait>(
        db: &C,
        event_id: Uuid,
        metadata: &LayoutMetadata,
        seats: &[SeatDraft],
        limits: &LayoutLimits,
    ) -> Result<LayoutSaved, LayoutError> {
        let layout = Self::lock_layout(db, event_id).await?;
        let event = events::Entity::find_by_id(event_id)
            .one(db)
            .await?
            .ok_or(LayoutError::NotFound("event"))?;

        let catalog = CatalogService::capacities(db, event.company_id).await?;
        let result = validate_layout(metadata, seats, &catalog, limits);
        if !result.valid {
            return Err(LayoutError::ValidationFailed(result.errors));
        }

        let existing = Self::seats_of(db, event_id).await?;
        let existing_ids: HashSet<Uuid> = existing.iter().map(|seat| seat.id).collect();

        // A draft keeps an existing seat only once; repeated or foreign ids become new seats
        let mut kept: HashSet<Uuid> = HashSet::new();
        let mut updates = Vec::new();
        let mut inserts = Vec::new();
        for draft in seats {
            match draft.id {
                Some(id) if existing_ids.contains(&id) && kept.insert(id) => {
                    updates.push((id, draft))
                }
                _ => inserts.push(draft),
            }
        }

        let dropped: Vec<&event_seatings::Model> = existing
            .iter()
            .filter(|seat| !kept.contains(&seat.id))
            .collect();
        let dropped_ids: Vec<Uuid> = dropped.iter().map(|seat| seat.id).collect();

        let reserved = ReservationLedger::reserved_seats(db, &dropped_ids).await?;
        if let Some(seat) = dropped.iter().find(|seat| reserved.contains(&seat.id)) {
            return Err(LayoutError::SeatInUse(seat.seat_number.clone()));
        }

        if !dropped_ids.is_empty() {
            event_seatings::Entity::delete_many()
                .filter(event_seatings::Column::Id.is_in(dropped_ids))
                .exec(db)
                .await?;
        }

        let timestamp = now();
        for (id, draft) in updates {
            event_seatings::ActiveModel {
                id: Unchanged(id),
                seating_type_id: Set(draft.seating_type_id),
                seat_number: Set(draft.seat_number.clone()),
                position_x: Set(draft.position_x),
                position_y: Set(draft.position_y),
                width: Set(draft.width),
                height: Set(draft.height),
                color_code: Set(draft.color_code.clone()),
                updated_at: Set(timestamp),
                ..Default::default()
            }
            .update(db)
            .await?;
        }

        let new_seats: Vec<event_seatings::ActiveModel> = inserts
            .into_iter()
            .map(|draft| new_seat(event_id, draft, SeatStatus::Available))
            .collect();
        if !new_seats.is_empty() {
            event_seatings::Entity::insert_many(new_seats)
                .exec(db)
                .await?;
        }

        let mut layout = layout.into_active_model();
        layout.canvas_width = Set(metadata.canvas_width);
        layout.canvas_height = Set(metadata.canvas_height);
        layout.grid_size = Set(metadata.grid_size);
        layout.stage_position = Set(metadata.stage_position);
        layout.stage_config = Set(metadata.stage_config.clone());
        layout.updated_at = Set(timestamp);
        layout.update(db).await?;

        Ok(LayoutSaved {
            seat_count: seats.len(),
            warnings: result.warnings,
        })
    }

    pub async fn get_layout(
        db: &DatabaseConnection,
        event_id: Uuid,
    ) -> Result<LayoutSnapshot, LayoutError> {
        let txn = begin_snapshot(db).await?;
        let snapshot = Self::snapshot_in(&txn, event_id).await?;
        txn.commit().await?;
        Ok(snapshot)
    }

    pub(crate) async fn snapshot_in<C: ConnectionTrait>(
        db: &C,
        event_id: Uuid,
    ) -> Result<LayoutSnapshot, LayoutError> {
        let layout = layouts::Entity::find_by_id(event_id)
            .one(db)
            .await?
            .ok_or(LayoutError::NotFound("event"))?;

        Ok(LayoutSnapshot {
            event_id,
            metadata: layout.metadata(),
            seats: Self::seats_of(db, event_id).await?,
        })
    }

    /// Moves one seat, snapping the target to the layout grid. Overlaps are
    /// not checked here; they are advisory and reported on the next full save.
    pub async fn move_seat(
        db: &DatabaseConnection,
        event_id: Uuid,
        seat_id: Uuid,
        x: f64,
        y: f64,
    ) -> Result<(f64, f64), LayoutError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(LayoutError::ValidationFailed(vec![format!(
                "position ({x}, {y}) must be finite numbers"
            )]));
        }

        let txn = db.begin().await?;
        let layout = Self::lock_layout(&txn, event_id).await?;
        let seat = Self::find_seat(&txn, event_id, seat_id).await?;

        let new_x = snap_to_grid(x, layout.grid_size);
        let new_y = snap_to_grid(y, layout.grid_size);
        if new_x < 0.0 || new_y < 0.0 {
            return Err(LayoutError::ValidationFailed(vec![format!(
                "seat {}: negative position ({new_x}, {new_y})",
                seat.seat_number
            )]));
        }

        let label = seat.seat_number.clone();
        let mut seat = seat.into_active_model();
        seat.position_x = Set(new_x);
        seat.position_y = Set(new_y);
        seat.updated_at = Set(now());
        seat.update(&txn).await?;
        txn.commit().await?;

        debug!("Moved seat {label} of event {event_id} to ({new_x}, {new_y})");
        Ok((new_x, new_y))
    }

    /// Appends `count` seats of one type in a row starting at `(x, y)`.
    ///
    /// Labels are the type's shape prefix followed by a three digit number,
    /// skipping numbers already used on this layout. At most
    /// [`MAX_ADDED_SEATS`] seats are added per call.
    pub async fn add_seats(
        db: &DatabaseConnection,
        event_id: Uuid,
        seating_type_id: Uuid,
        count: usize,
        x: f64,
        y: f64,
    ) -> Result<Vec<event_seatings::Model>, LayoutError> {
        if count == 0 || count > MAX_ADDED_SEATS {
            return Err(LayoutError::ValidationFailed(vec![format!(
                "seat count {count} is outside 1..={MAX_ADDED_SEATS}"
            )]));
        }
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return Err(LayoutError::ValidationFailed(vec![format!(
                "cannot add seats at ({x}, {y})"
            )]));
        }

        let txn = db.begin().await?;
        let layout = Self::lock_layout(&txn, event_id).await?;
        let event = events::Entity::find_by_id(event_id)
            .one(&txn)
            .await?
            .ok_or(LayoutError::NotFound("event"))?;

        let seating_type = seating_types::Entity::find_by_id(seating_type_id)
            .filter(seating_types::Column::CompanyId.eq(event.company_id))
            .one(&txn)
            .await?
            .ok_or(LayoutError::NotFound("seating type"))?;

        let used: HashSet<String> = Self::seats_of(&txn, event_id)
            .await?
            .into_iter()
            .map(|seat| seat.seat_number)
            .collect();
        let labels = next_labels(seating_type.shape.label_prefix(), &used, count);

        let step = DEFAULT_SEAT_WIDTH + f64::from(layout.grid_size.max(0));
        let start_x = snap_to_grid(x, layout.grid_size);
        let start_y = snap_to_grid(y, layout.grid_size);

        let canvas_width = f64::from(layout.canvas_width);
        let canvas_height = f64::from(layout.canvas_height);
        let mut outside = 0;
        let mut created = Vec::with_capacity(labels.len());
        for (i, label) in labels.into_iter().enumerate() {
            let x = start_x + step * i as f64;
            let draft = SeatDraft::new(seating_type_id, label, x, start_y);
            if !draft.rect().fits_within(canvas_width, canvas_height) {
                outside += 1;
            }

            let seat = new_seat(event_id, &draft, SeatStatus::Available)
                .insert(&txn)
                .await?;
            created.push(seat);
        }
        txn.commit().await?;

        if outside > 0 {
            warn!("{outside} seats added to event {event_id} extend beyond the canvas");
        }

        info!(
            "Added {} {} seats to event {event_id}",
            created.len(),
            seating_type.name
        );
        Ok(created)
    }

    /// Deletes one seat unless it still has an active reservation
    pub async fn remove_seat(
        db: &DatabaseConnection,
        event_id: Uuid,
        seat_id: Uuid,
    ) -> Result<(), LayoutError> {
        let txn = db.begin().await?;
        Self::lock_layout(&txn, event_id).await?;
        let seat = Self::find_seat(&txn, event_id, seat_id).await?;

        if ReservationLedger::has_active_reservation(&txn, seat_id).await? {
            return Err(LayoutError::SeatInUse(seat.seat_number));
        }

        event_seatings::Entity::delete_by_id(seat_id)
            .exec(&txn)
            .await?;
        txn.commit().await?;

        info!("Removed seat {} from event {event_id}", seat.seat_number);
        Ok(())
    }

    /// Administrative enable/disable. Re-enabling derives the status from
    /// the reservation ledger again.
    pub async fn set_seat_disabled(
        db: &DatabaseConnection,
        event_id: Uuid,
        seat_id: Uuid,
        disabled: bool,
    ) -> Result<SeatStatus, LayoutError> {
        let txn = db.begin().await?;
        let seat = Self::find_seat(&txn, event_id, seat_id).await?;

        let status = if disabled {
            SeatStatus::Disabled
        } else {
            SeatStatus::from_reservation(
                ReservationLedger::has_active_reservation(&txn, seat_id).await?,
            )
        };

        if seat.status != status {
            let mut seat = seat.into_active_model();
            seat.status = Set(status);
            seat.updated_at = Set(now());
            seat.update(&txn).await?;
        }
        txn.commit().await?;

        Ok(status)
    }

    /// Re-derives `reserved`/`available` for every seat that is not disabled.
    /// Returns the number of seats whose status changed.
    pub async fn sync_seat_statuses(
        db: &DatabaseConnection,
        event_id: Uuid,
    ) -> Result<usize, LayoutError> {
        let txn = db.begin().await?;
        Self::lock_layout(&txn, event_id).await?;

        let seats: Vec<event_seatings::Model> = Self::seats_of(&txn, event_id)
            .await?
            .into_iter()
            .filter(|seat| seat.status != SeatStatus::Disabled)
            .collect();
        let ids: Vec<Uuid> = seats.iter().map(|seat| seat.id).collect();
        let reserved = ReservationLedger::reserved_seats(&txn, &ids).await?;

        let timestamp = now();
        let mut changed = 0;
        for seat in seats {
            let status = SeatStatus::from_reservation(reserved.contains(&seat.id));
            if seat.status == status {
                continue;
            }

            let mut seat = seat.into_active_model();
            seat.status = Set(status);
            seat.updated_at = Set(timestamp);
            seat.update(&txn).await?;
            changed += 1;
        }
        txn.commit().await?;

        debug!("Synchronized seat statuses for event {event_id}: {changed} changed");
        Ok(changed)
    }

    /// Removes the layout of an event that is being deleted.
    ///
    /// Refuses while any seat still has an active reservation. Runs on the
    /// caller's transaction.
    pub async fn purge_event<C: ConnectionTrait>(
        db: &C,
        event_id: Uuid,
    ) -> Result<u64, LayoutError> {
        let seats = Self::seats_of(db, event_id).await?;
        let ids: Vec<Uuid> = seats.iter().map(|seat| seat.id).collect();

        let reserved = ReservationLedger::reserved_seats(db, &ids).await?;
        if let Some(seat) = seats.iter().find(|seat| reserved.contains(&seat.id)) {
            return Err(LayoutError::SeatInUse(seat.seat_number.clone()));
        }

        let deleted = event_seatings::Entity::delete_many()
            .filter(event_seatings::Column::EventId.eq(event_id))
            .exec(db)
            .await?
            .rows_affected;
        layouts::Entity::delete_by_id(event_id).exec(db).await?;

        Ok(deleted)
    }

    async fn lock_layout<C: ConnectionTrait>(
        db: &C,
        event_id: Uuid,
    ) -> Result<layouts::Model, LayoutError> {
        layouts::Entity::find_by_id(event_id)
            .lock_exclusive()
            .one(db)
            .await?
            .ok_or(LayoutError::NotFound("event"))
    }

    async fn find_seat<C: ConnectionTrait>(
        db: &C,
        event_id: Uuid,
        seat_id: Uuid,
    ) -> Result<event_seatings::Model, LayoutError> {
        event_seatings::Entity::find_by_id(seat_id)
            .filter(event_seatings::Column::EventId.eq(event_id))
            .one(db)
            .await?
            .ok_or(LayoutError::NotFound("seat"))
    }

    pub(crate) async fn seats_of<C: ConnectionTrait>(
        db: &C,
        event_id: Uuid,
    ) -> Result<Vec<event_seatings::Model>, sea_orm::DbErr> {
        event_seatings::Entity::find()
            .filter(event_seatings::Column::EventId.eq(event_id))
            .order_by_asc(event_seatings::Column::SeatNumber)
            .order_by_asc(event_seatings::Column::Id)
            .all(db)
            .await
    }
}

fn new_seat(
    event_id: Uuid,
    draft: &SeatDraft,
    status: SeatStatus,
) -> event_seatings::ActiveModel {
    let timestamp = now();
    event_seatings::ActiveModel {
        id: Set(Uuid::new_v4()),
        event_id: Set(event_id),
        seating_type_id: Set(draft.seating_type_id),
        seat_number: Set(draft.seat_number.clone()),
        position_x: Set(draft.position_x),
        position_y: Set(draft.position_y),
        width: Set(draft.width),
        height: Set(draft.height),
        color_code: Set(draft.color_code.clone()),
        status: Set(status),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
    }
}

/// The first `count` unused labels of the form `M001`, `M002`, ...
fn next_labels(prefix: char, used: &HashSet<String>, count: usize) -> Vec<String> {
    (1..)
        .map(|n: u32| format!("{prefix}{n:03}"))
        .filter(|label| !used.contains(label))
        .take(count)
        .collect()
}
