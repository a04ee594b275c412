//! Checkout confirmation workflow
//!
//! Confirmation materializes a paid session exactly once, recomputes
//! amounts server-side, and never refuses a paid order even when the slot
//! filled in the meantime.

mod common;

use pickup_server::checkout::{self, ConfirmOutcome};
use pickup_server::db::repository::{order_event, slot};
use shared::CheckoutMetadata;
use shared::order::{OrderStatus, PaymentStatus};
use sqlx::SqlitePool;

async fn seed_pricing(pool: &SqlitePool) {
    sqlx::query(
        "INSERT INTO pricing_config \
         (per_bag_cents, pickup_fee_cents, min_order_cents, free_pickup_threshold_cents, updated_at) \
         VALUES (2500, 300, 0, 5000, datetime('now'))",
    )
    .execute(pool)
    .await
    .expect("seed pricing");
}

fn metadata(zone_id: i64, slot_id: i64, est_bags: i64) -> CheckoutMetadata {
    CheckoutMetadata {
        user_id: Some("user-1".to_string()),
        customer_email: Some("user-1@example.com".to_string()),
        postal_code: "10001".to_string(),
        zone_id,
        slot_id,
        est_bags,
        instructions: None,
        subtotal_cents: est_bags * 2500,
        fee_cents: if est_bags * 2500 >= 5000 { 0 } else { 300 },
        tip_cents: 0,
        total_cents: est_bags * 2500 + if est_bags * 2500 >= 5000 { 0 } else { 300 },
    }
}

#[tokio::test]
async fn confirm_creates_scheduled_order_and_reserves_seat() {
    let ctx = common::setup().await;
    let pool = &ctx.state.pool;
    seed_pricing(pool).await;
    let zone_id = common::seed_zone(pool, "Downtown", &["10001"]).await;
    let slot_id = common::seed_slot(pool, zone_id, common::date("2026-09-01"), 4).await;

    let outcome = checkout::confirm(&ctx.state, "cs_test_1", metadata(zone_id, slot_id, 1), Some(2800))
        .await
        .expect("confirm");

    let order = match outcome {
        ConfirmOutcome::Created(order) => order,
        ConfirmOutcome::Duplicate(_) => panic!("first delivery must create"),
    };
    assert_eq!(order.status, OrderStatus::Scheduled);
    assert_eq!(order.payment_status, PaymentStatus::Paid);
    assert_eq!(order.subtotal_cents, 2500);
    assert_eq!(order.fee_cents, 300);
    assert_eq!(order.total_cents, 2800);
    assert!(!order.needs_reconciliation);

    let slot = slot::find_by_id(pool, slot_id).await.expect("fetch").expect("exists");
    assert_eq!(slot.used_count, 1);

    let events = order_event::list_for_order(pool, order.id).await.expect("events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, "status:scheduled");
}

#[tokio::test]
async fn duplicate_confirmation_is_idempotent() {
    let ctx = common::setup().await;
    let pool = &ctx.state.pool;
    seed_pricing(pool).await;
    let zone_id = common::seed_zone(pool, "Downtown", &["10001"]).await;
    let slot_id = common::seed_slot(pool, zone_id, common::date("2026-09-01"), 4).await;

    let meta = metadata(zone_id, slot_id, 2);
    let first = checkout::confirm(&ctx.state, "cs_test_dup", meta.clone(), None)
        .await
        .expect("first confirm");
    let first_id = match first {
        ConfirmOutcome::Created(order) => order.id,
        ConfirmOutcome::Duplicate(_) => panic!("first delivery must create"),
    };

    let second = checkout::confirm(&ctx.state, "cs_test_dup", meta, None)
        .await
        .expect("second confirm");
    match second {
        ConfirmOutcome::Duplicate(order) => assert_eq!(order.id, first_id),
        ConfirmOutcome::Created(_) => panic!("second delivery must not create"),
    }

    // One seat, one audit event
    let slot = slot::find_by_id(pool, slot_id).await.expect("fetch").expect("exists");
    assert_eq!(slot.used_count, 1);
    let events = order_event::list_for_order(pool, first_id).await.expect("events");
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn free_pickup_threshold_applies_at_confirmation() {
    let ctx = common::setup().await;
    let pool = &ctx.state.pool;
    seed_pricing(pool).await;
    let zone_id = common::seed_zone(pool, "Downtown", &["10001"]).await;
    let slot_id = common::seed_slot(pool, zone_id, common::date("2026-09-01"), 4).await;

    let outcome = checkout::confirm(&ctx.state, "cs_test_3", metadata(zone_id, slot_id, 3), Some(7500))
        .await
        .expect("confirm");
    let order = match outcome {
        ConfirmOutcome::Created(order) => order,
        ConfirmOutcome::Duplicate(_) => panic!("first delivery must create"),
    };
    assert_eq!(order.subtotal_cents, 7500);
    assert_eq!(order.fee_cents, 0);
    assert_eq!(order.total_cents, 7500);
}

#[tokio::test]
async fn full_slot_flags_order_for_reconciliation() {
    let ctx = common::setup().await;
    let pool = &ctx.state.pool;
    seed_pricing(pool).await;
    let zone_id = common::seed_zone(pool, "Downtown", &["10001"]).await;
    let slot_id = common::seed_slot(pool, zone_id, common::date("2026-09-01"), 1).await;

    // The last seat goes to someone else between payment and confirmation
    checkout::confirm(&ctx.state, "cs_other", metadata(zone_id, slot_id, 1), None)
        .await
        .expect("first confirm");

    let outcome = checkout::confirm(&ctx.state, "cs_late", metadata(zone_id, slot_id, 1), None)
        .await
        .expect("late confirm still succeeds");
    let order = match outcome {
        ConfirmOutcome::Created(order) => order,
        ConfirmOutcome::Duplicate(_) => panic!("distinct session must create"),
    };

    assert_eq!(order.status, OrderStatus::Scheduled);
    assert!(order.needs_reconciliation);

    let slot = slot::find_by_id(pool, slot_id).await.expect("fetch").expect("exists");
    assert_eq!(slot.used_count, 1);

    let events = order_event::list_for_order(pool, order.id).await.expect("events");
    let kinds: Vec<&str> = events.iter().map(|e| e.kind.as_str()).collect();
    assert!(kinds.contains(&"reconciliation_required"), "got: {kinds:?}");
    assert!(kinds.contains(&"status:scheduled"));
}
