mod common;

use common::{book, cancel, default_metadata, fixture, scenario_seats, seat, seat_shapes};
use models::{
    layout::{LayoutMetadata, SeatDraft, SeatStatus, StagePosition},
    validation::LayoutLimits,
};
use sea_orm::TransactionTrait;
use seating_database::{
    error::LayoutError,
    services::{
        layout::{LayoutService, MAX_ADDED_SEATS},
        tenant::TenantService,
    },
};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_replace_and_get_layout() {
    let f = fixture().await;
    let metadata = LayoutMetadata {
        canvas_width: 1000,
        canvas_height: 700,
        grid_size: 25,
        stage_position: StagePosition::Left,
        stage_config: json!({ "x": 10, "y": 200, "width": 80, "height": 300 }),
    };
    let seats = scenario_seats(f.table, f.chair);

    let saved = LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &metadata,
        &seats,
        &LayoutLimits::default(),
    )
    .await
    .unwrap();
    assert_eq!(saved.seat_count, 5);
    assert!(saved.warnings.is_empty());

    let layout = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();
    assert_eq!(layout.metadata, metadata);
    let labels: Vec<&str> = layout
        .seats
        .iter()
        .map(|s| s.seat_number.as_str())
        .collect();
    assert_eq!(labels, ["K1", "K2", "M1", "M2", "M3"]);
    for seat in &layout.seats {
        assert_eq!(seat.status, SeatStatus::Available);
    }
}

#[tokio::test]
async fn test_new_event_has_default_layout() {
    let f = fixture().await;

    let layout = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();
    assert_eq!(layout.metadata, LayoutMetadata::default());
    assert!(layout.seats.is_empty());
}

#[tokio::test]
async fn test_overlaps_are_saved_with_warnings() {
    let f = fixture().await;
    let seats = vec![
        SeatDraft::new(f.table, "M1", 100.0, 100.0),
        SeatDraft::new(f.table, "M2", 130.0, 110.0),
        SeatDraft::new(f.chair, "K1", 780.0, 100.0),
    ];

    let saved = LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &seats,
        &LayoutLimits::default(),
    )
    .await
    .unwrap();

    assert_eq!(saved.warnings.len(), 2);
    assert!(
        saved
            .warnings
            .iter()
            .any(|w| w.contains("M1") && w.contains("M2"))
    );
    assert!(saved.warnings.iter().any(|w| w.contains("K1")));

    let layout = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();
    assert_eq!(layout.seats.len(), 3);
}

#[tokio::test]
async fn test_invalid_layout_leaves_previous_intact() {
    let f = fixture().await;
    let limits = LayoutLimits::default();
    LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &scenario_seats(f.table, f.chair),
        &limits,
    )
    .await
    .unwrap();
    let before = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();

    let seats = vec![
        SeatDraft::new(f.table, "M1", 40.0, 100.0),
        SeatDraft::new(f.table, "M1", 240.0, 100.0),
        SeatDraft::new(Uuid::new_v4(), "X1", 400.0, 100.0),
    ];
    let metadata = LayoutMetadata {
        canvas_width: 5000,
        ..default_metadata()
    };

    let err = LayoutService::replace_layout(&f.db, f.event.id, &metadata, &seats, &limits)
        .await
        .unwrap_err();
    match err {
        LayoutError::ValidationFailed(errors) => {
            assert!(errors.iter().any(|e| e.contains("duplicate seat label M1")));
            assert!(errors.iter().any(|e| e.contains("unknown seating type")));
            assert!(errors.iter().any(|e| e.contains("canvas width 5000")));
        }
        other => panic!("expected ValidationFailed, got {other:?}"),
    }

    let after = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_seating_types_of_other_tenants_are_unknown() {
    let f = fixture().await;
    let other = TenantService::provision(&f.db, "Riverside Venue")
        .await
        .unwrap();
    let foreign_table = common::type_id(&f.db, other.id, "Table for 4").await;

    let err = LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &[SeatDraft::new(foreign_table, "M1", 40.0, 40.0)],
        &LayoutLimits::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, LayoutError::ValidationFailed(_)));
}

#[tokio::test]
async fn test_dropping_reserved_seat_is_refused() {
    let f = fixture().await;
    let limits = LayoutLimits::default();
    LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &scenario_seats(f.table, f.chair),
        &limits,
    )
    .await
    .unwrap();
    let m1 = seat(&f.db, f.event.id, "M1").await;
    book(&f.db, f.event.id, m1.id, 3).await;
    let before = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();

    let without_m1: Vec<SeatDraft> = scenario_seats(f.table, f.chair)
        .into_iter()
        .filter(|s| s.seat_number != "M1")
        .collect();
    let err = LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &without_m1,
        &limits,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, LayoutError::SeatInUse(ref label) if label == "M1"));
    let after = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_same_label_without_identity_still_drops_reserved_seat() {
    let f = fixture().await;
    let limits = LayoutLimits::default();
    LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &scenario_seats(f.table, f.chair),
        &limits,
    )
    .await
    .unwrap();
    let m1 = seat(&f.db, f.event.id, "M1").await;
    book(&f.db, f.event.id, m1.id, 2).await;

    // Same labels, but no draft carries M1's id
    let err = LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &scenario_seats(f.table, f.chair),
        &limits,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, LayoutError::SeatInUse(ref label) if label == "M1"));
}

#[tokio::test]
async fn test_kept_seat_keeps_identity_and_reservation() {
    let f = fixture().await;
    let limits = LayoutLimits::default();
    LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &scenario_seats(f.table, f.chair),
        &limits,
    )
    .await
    .unwrap();
    let m1 = seat(&f.db, f.event.id, "M1").await;
    book(&f.db, f.event.id, m1.id, 4).await;
    LayoutService::sync_seat_statuses(&f.db, f.event.id)
        .await
        .unwrap();

    let seats = vec![
        SeatDraft::new(f.table, "M1", 400.0, 200.0)
            .with_color("#123abc")
            .keeping(m1.id),
        SeatDraft::new(f.chair, "K9", 40.0, 300.0),
    ];
    LayoutService::replace_layout(&f.db, f.event.id, &default_metadata(), &seats, &limits)
        .await
        .unwrap();

    let layout = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();
    assert_eq!(layout.seats.len(), 2);

    let kept = seat(&f.db, f.event.id, "M1").await;
    assert_eq!(kept.id, m1.id);
    assert_eq!((kept.position_x, kept.position_y), (400.0, 200.0));
    assert_eq!(kept.color_code.as_deref(), Some("#123abc"));
    assert_eq!(kept.status, SeatStatus::Reserved);

    let fresh = seat(&f.db, f.event.id, "K9").await;
    assert_eq!(fresh.status, SeatStatus::Available);
}

#[tokio::test]
async fn test_uncommitted_replace_is_rolled_back() {
    let f = fixture().await;
    let limits = LayoutLimits::default();
    LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &scenario_seats(f.table, f.chair),
        &limits,
    )
    .await
    .unwrap();
    let before = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();

    // Fail after every write of the replace has gone through
    let txn = f.db.begin().await.unwrap();
    let metadata = LayoutMetadata {
        canvas_width: 1200,
        ..default_metadata()
    };
    LayoutService::replace_layout_in(
        &txn,
        f.event.id,
        &metadata,
        &[SeatDraft::new(f.table, "M9", 500.0, 500.0)],
        &limits,
    )
    .await
    .unwrap();
    txn.rollback().await.unwrap();

    let after = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_replace_unknown_event() {
    let f = fixture().await;

    let err = LayoutService::replace_layout(
        &f.db,
        Uuid::new_v4(),
        &default_metadata(),
        &[],
        &LayoutLimits::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, LayoutError::NotFound("event")));
}

#[tokio::test]
async fn test_move_seat_snaps_to_grid() {
    let f = fixture().await;
    LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &scenario_seats(f.table, f.chair),
        &LayoutLimits::default(),
    )
    .await
    .unwrap();
    let m1 = seat(&f.db, f.event.id, "M1").await;

    let moved = LayoutService::move_seat(&f.db, f.event.id, m1.id, 103.0, 57.0)
        .await
        .unwrap();
    assert_eq!(moved, (100.0, 60.0));

    let stored = seat(&f.db, f.event.id, "M1").await;
    assert_eq!((stored.position_x, stored.position_y), (100.0, 60.0));
}

#[tokio::test]
async fn test_move_seat_onto_another_is_accepted() {
    let f = fixture().await;
    LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &scenario_seats(f.table, f.chair),
        &LayoutLimits::default(),
    )
    .await
    .unwrap();
    let m2 = seat(&f.db, f.event.id, "M2").await;

    let moved = LayoutService::move_seat(&f.db, f.event.id, m2.id, 40.0, 100.0)
        .await
        .unwrap();
    assert_eq!(moved, (40.0, 100.0));
}

#[tokio::test]
async fn test_move_seat_rejections() {
    let f = fixture().await;
    LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &scenario_seats(f.table, f.chair),
        &LayoutLimits::default(),
    )
    .await
    .unwrap();
    let m1 = seat(&f.db, f.event.id, "M1").await;

    let missing = LayoutService::move_seat(&f.db, f.event.id, Uuid::new_v4(), 10.0, 10.0).await;
    assert!(matches!(missing, Err(LayoutError::NotFound("seat"))));

    let negative = LayoutService::move_seat(&f.db, f.event.id, m1.id, -40.0, 10.0).await;
    assert!(matches!(negative, Err(LayoutError::ValidationFailed(_))));

    let nan = LayoutService::move_seat(&f.db, f.event.id, m1.id, f64::NAN, 10.0).await;
    assert!(matches!(nan, Err(LayoutError::ValidationFailed(_))));

    let unchanged = seat(&f.db, f.event.id, "M1").await;
    assert_eq!((unchanged.position_x, unchanged.position_y), (40.0, 100.0));
}

#[tokio::test]
async fn test_add_seats_generates_labels() {
    let f = fixture().await;
    LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &[SeatDraft::new(f.table, "M002", 40.0, 40.0)],
        &LayoutLimits::default(),
    )
    .await
    .unwrap();

    let tables = LayoutService::add_seats(&f.db, f.event.id, f.table, 3, 100.0, 200.0)
        .await
        .unwrap();
    let labels: Vec<&str> = tables.iter().map(|s| s.seat_number.as_str()).collect();
    assert_eq!(labels, ["M001", "M003", "M004"]);
    assert_eq!((tables[0].position_x, tables[0].position_y), (100.0, 200.0));
    assert!(tables[1].position_x > tables[0].position_x);

    let chairs = LayoutService::add_seats(&f.db, f.event.id, f.chair, 1, 100.0, 400.0)
        .await
        .unwrap();
    assert_eq!(chairs[0].seat_number, "K001");

    let layout = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();
    assert_eq!(layout.seats.len(), 5);
}

#[tokio::test]
async fn test_add_seats_count_is_bounded() {
    let f = fixture().await;

    let none = LayoutService::add_seats(&f.db, f.event.id, f.table, 0, 100.0, 100.0).await;
    assert!(matches!(none, Err(LayoutError::ValidationFailed(_))));

    let count = MAX_ADDED_SEATS + 1;
    let too_many = LayoutService::add_seats(&f.db, f.event.id, f.chair, count, 0.0, 0.0).await;
    assert!(matches!(too_many, Err(LayoutError::ValidationFailed(_))));

    let layout = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();
    assert!(layout.seats.is_empty());
}

#[tokio::test]
async fn test_remove_seat_guard() {
    let f = fixture().await;
    LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &scenario_seats(f.table, f.chair),
        &LayoutLimits::default(),
    )
    .await
    .unwrap();
    let m1 = seat(&f.db, f.event.id, "M1").await;
    let reservation = book(&f.db, f.event.id, m1.id, 2).await;

    let err = LayoutService::remove_seat(&f.db, f.event.id, m1.id)
        .await
        .unwrap_err();
    assert!(matches!(err, LayoutError::SeatInUse(ref label) if label == "M1"));

    cancel(&f.db, reservation).await;
    LayoutService::remove_seat(&f.db, f.event.id, m1.id)
        .await
        .unwrap();

    let layout = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();
    assert!(layout.seats.iter().all(|s| s.seat_number != "M1"));
}

#[tokio::test]
async fn test_seat_status_follows_ledger_unless_disabled() {
    let f = fixture().await;
    LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &scenario_seats(f.table, f.chair),
        &LayoutLimits::default(),
    )
    .await
    .unwrap();
    let m1 = seat(&f.db, f.event.id, "M1").await;
    let k1 = seat(&f.db, f.event.id, "K1").await;

    let reservation = book(&f.db, f.event.id, m1.id, 4).await;
    book(&f.db, f.event.id, k1.id, 1).await;

    let status = LayoutService::set_seat_disabled(&f.db, f.event.id, k1.id, true)
        .await
        .unwrap();
    assert_eq!(status, SeatStatus::Disabled);

    let changed = LayoutService::sync_seat_statuses(&f.db, f.event.id)
        .await
        .unwrap();
    assert_eq!(changed, 1);
    let m1 = seat(&f.db, f.event.id, "M1").await;
    assert_eq!(m1.status, SeatStatus::Reserved);
    let k1 = seat(&f.db, f.event.id, "K1").await;
    assert_eq!(k1.status, SeatStatus::Disabled);

    cancel(&f.db, reservation).await;
    LayoutService::sync_seat_statuses(&f.db, f.event.id)
        .await
        .unwrap();
    let m1 = seat(&f.db, f.event.id, "M1").await;
    assert_eq!(m1.status, SeatStatus::Available);

    let status = LayoutService::set_seat_disabled(&f.db, f.event.id, k1.id, false)
        .await
        .unwrap();
    assert_eq!(status, SeatStatus::Reserved);
}

#[tokio::test]
async fn test_overlap_tolerance_is_configurable() {
    let f = fixture().await;
    let seats = vec![
        SeatDraft::new(f.table, "M1", 100.0, 100.0),
        SeatDraft::new(f.table, "M2", 150.0, 100.0),
    ];
    // 10x40 shared
    let limits = LayoutLimits {
        overlap_tolerance: 400.0,
        ..LayoutLimits::default()
    };

    let saved =
        LayoutService::replace_layout(&f.db, f.event.id, &default_metadata(), &seats, &limits)
            .await
            .unwrap();
    assert!(saved.warnings.is_empty());

    let saved = LayoutService::replace_layout(
        &f.db,
        f.event.id,
        &default_metadata(),
        &seats,
        &LayoutLimits::default(),
    )
    .await
    .unwrap();
    assert_eq!(saved.warnings.len(), 1);

    let layout = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();
    assert_eq!(
        seat_shapes(&layout.seats).len(),
        2,
        "a resave replaces rather than appends"
    );
}

#[tokio::test]
async fn test_concurrent_replacements_do_not_interleave() {
    let f = fixture().await;
    let limits = LayoutLimits::default();
    let metadata = default_metadata();
    let first = scenario_seats(f.table, f.chair);
    let second = vec![
        SeatDraft::new(f.table, "T1", 40.0, 400.0),
        SeatDraft::new(f.table, "T2", 140.0, 400.0),
        SeatDraft::new(f.table, "T3", 240.0, 400.0),
        SeatDraft::new(f.table, "T4", 340.0, 400.0),
    ];
    LayoutService::replace_layout(&f.db, f.event.id, &metadata, &first, &limits)
        .await
        .unwrap();

    let (a, b, read) = tokio::join!(
        LayoutService::replace_layout(&f.db, f.event.id, &metadata, &first, &limits),
        LayoutService::replace_layout(&f.db, f.event.id, &metadata, &second, &limits),
        LayoutService::get_layout(&f.db, f.event.id),
    );
    assert_eq!(a.unwrap().seat_count, 5);
    assert_eq!(b.unwrap().seat_count, 4);

    let first_labels = ["K1", "K2", "M1", "M2", "M3"];
    let second_labels = ["T1", "T2", "T3", "T4"];

    let read = read.unwrap();
    let seen: Vec<&str> = read.seats.iter().map(|s| s.seat_number.as_str()).collect();
    assert!(seen == first_labels || seen == second_labels, "{seen:?}");

    let layout = LayoutService::get_layout(&f.db, f.event.id).await.unwrap();
    let labels: Vec<&str> = layout
        .seats
        .iter()
        .map(|s| s.seat_number.as_str())
        .collect();
    assert!(labels == first_labels || labels == second_labels, "{labels:?}");
}
