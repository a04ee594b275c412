//! Zone resolution and postal-code assignment

mod common;

use pickup_server::db::repository::{RepoError, zone};
use shared::models::{ZoneCreate, ZoneUpdate};

#[tokio::test]
async fn resolve_finds_the_owning_zone() {
    let ctx = common::setup().await;
    let pool = &ctx.state.pool;
    let downtown = common::seed_zone(pool, "Downtown", &["10001", "10002"]).await;
    let uptown = common::seed_zone(pool, "Uptown", &["20002"]).await;

    let zone = zone::resolve(pool, "10002").await.expect("query").expect("found");
    assert_eq!(zone.id, downtown);
    let zone = zone::resolve(pool, "20002").await.expect("query").expect("found");
    assert_eq!(zone.id, uptown);
    assert!(zone::resolve(pool, "99999").await.expect("query").is_none());
}

#[tokio::test]
async fn a_postal_code_belongs_to_exactly_one_zone() {
    let ctx = common::setup().await;
    let pool = &ctx.state.pool;
    common::seed_zone(pool, "Downtown", &["10001"]).await;
    let uptown = common::seed_zone(pool, "Uptown", &[]).await;

    let err = zone::add_postal_code(pool, uptown, "10001").await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)), "got: {err:?}");

    // Creating a whole zone with a taken code fails the same way
    let err = zone::create(
        pool,
        ZoneCreate {
            name: "Midtown".to_string(),
            pickup_fee_cents: 0,
            postal_codes: vec!["30003".to_string(), "10001".to_string()],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)), "got: {err:?}");
    // The failed create must not leave the zone or its first code behind
    assert!(zone::resolve(pool, "30003").await.expect("query").is_none());
}

#[tokio::test]
async fn codes_can_move_between_zones() {
    let ctx = common::setup().await;
    let pool = &ctx.state.pool;
    let downtown = common::seed_zone(pool, "Downtown", &["10001"]).await;
    let uptown = common::seed_zone(pool, "Uptown", &[]).await;

    assert!(zone::remove_postal_code(pool, downtown, "10001").await.expect("remove"));
    zone::add_postal_code(pool, uptown, "10001").await.expect("reassign");

    let zone = zone::resolve(pool, "10001").await.expect("query").expect("found");
    assert_eq!(zone.id, uptown);
}

#[tokio::test]
async fn update_is_partial_and_delete_refuses_zones_with_slots() {
    let ctx = common::setup().await;
    let pool = &ctx.state.pool;
    let downtown = common::seed_zone(pool, "Downtown", &["10001"]).await;

    let zone = zone::update(
        pool,
        downtown,
        ZoneUpdate {
            name: None,
            pickup_fee_cents: Some(500),
        },
    )
    .await
    .expect("update");
    assert_eq!(zone.name, "Downtown");
    assert_eq!(zone.pickup_fee_cents, 500);

    common::seed_slot(pool, downtown, common::date("2026-09-01"), 4).await;
    let err = zone::delete(pool, downtown).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)), "got: {err:?}");
}
