//! Slot capacity ledger under contention
//!
//! The reservation guard lives in a single SQL statement, so hammering one
//! slot from many tasks must never oversell it.

mod common;

use pickup_server::db::repository::slot::{self, ReserveOutcome};
use pickup_server::slots;
use shared::models::GenerateWindowsRequest;

#[tokio::test]
async fn concurrent_reservations_never_oversell() {
    let ctx = common::setup().await;
    let pool = &ctx.state.pool;
    let zone_id = common::seed_zone(pool, "Downtown", &["10001"]).await;
    let slot_id = common::seed_slot(pool, zone_id, common::date("2026-09-01"), 10).await;

    let mut handles = Vec::new();
    for _ in 0..50 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            slot::reserve(&pool, slot_id).await.expect("reserve query")
        }));
    }

    let mut reserved = 0;
    let mut full = 0;
    for handle in handles {
        match handle.await.expect("task join") {
            ReserveOutcome::Reserved => reserved += 1,
            ReserveOutcome::SlotFull => full += 1,
            ReserveOutcome::NotFound => panic!("slot exists"),
        }
    }

    assert_eq!(reserved, 10);
    assert_eq!(full, 40);

    let slot = slot::find_by_id(pool, slot_id)
        .await
        .expect("fetch")
        .expect("exists");
    assert_eq!(slot.used_count, 10);
    assert!(slot.is_full());
}

#[tokio::test]
async fn release_never_goes_negative() {
    let ctx = common::setup().await;
    let pool = &ctx.state.pool;
    let zone_id = common::seed_zone(pool, "Downtown", &["10001"]).await;
    let slot_id = common::seed_slot(pool, zone_id, common::date("2026-09-01"), 5).await;

    assert!(matches!(
        slot::reserve(pool, slot_id).await.expect("reserve"),
        ReserveOutcome::Reserved
    ));
    slot::release(pool, slot_id).await.expect("release");
    // Second release has nothing to undo
    slot::release(pool, slot_id).await.expect("release");

    let slot = slot::find_by_id(pool, slot_id)
        .await
        .expect("fetch")
        .expect("exists");
    assert_eq!(slot.used_count, 0);
}

#[tokio::test]
async fn capacity_cannot_shrink_below_reservations() {
    let ctx = common::setup().await;
    let pool = &ctx.state.pool;
    let zone_id = common::seed_zone(pool, "Downtown", &["10001"]).await;
    let slot_id = common::seed_slot(pool, zone_id, common::date("2026-09-01"), 5).await;

    for _ in 0..3 {
        assert!(matches!(
            slot::reserve(pool, slot_id).await.expect("reserve"),
            ReserveOutcome::Reserved
        ));
    }

    let err = slots::adjust_capacity(pool, slot_id, 2).await.unwrap_err();
    assert!(err.to_string().contains("below used count"), "got: {err}");

    let slot = slots::adjust_capacity(pool, slot_id, 3).await.expect("shrink to exactly used");
    assert_eq!(slot.capacity, 3);
    assert!(slot.is_full());
}

#[tokio::test]
async fn generate_windows_is_idempotent() {
    let ctx = common::setup().await;
    let pool = &ctx.state.pool;
    let zone_id = common::seed_zone(pool, "Downtown", &["10001"]).await;

    let req = GenerateWindowsRequest {
        zone_id,
        date_from: common::date("2026-09-01"),
        date_to: common::date("2026-09-07"),
        window_start: "09:00".to_string(),
        window_end: "12:00".to_string(),
        capacity: 8,
    };

    let first = slots::generate_windows(pool, req.clone()).await.expect("generate");
    assert_eq!(first.requested, 7);
    assert_eq!(first.created, 7);

    // Overlapping rerun creates only the new days
    let wider = GenerateWindowsRequest {
        date_to: common::date("2026-09-10"),
        ..req
    };
    let second = slots::generate_windows(pool, wider).await.expect("regenerate");
    assert_eq!(second.requested, 10);
    assert_eq!(second.created, 3);
}
