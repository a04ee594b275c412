//! Payment webhook over HTTP
//!
//! Drives the assembled router end to end: signature verification against
//! raw bytes, event dispatch, and the admin route gates around it.

mod common;

use axum::body::Body;
use chrono::Utc;
use http::{Request, StatusCode};
use pickup_server::api;
use pickup_server::db::repository::order;
use pickup_server::services::SignatureVerifier;
use shared::order::OrderStatus;
use sqlx::SqlitePool;
use tower::ServiceExt;

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

fn session_event(session_id: &str, zone_id: i64, slot_id: i64) -> String {
    serde_json::json!({
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "id": session_id,
                "amount_total": 2800,
                "metadata": {
                    "user_id": "cust-1",
                    "customer_email": "cust-1@example.com",
                    "postal_code": "10001",
                    "zone_id": zone_id.to_string(),
                    "slot_id": slot_id.to_string(),
                    "est_bags": "1",
                    "instructions": "",
                    "subtotal_cents": "2500",
                    "fee_cents": "300",
                    "tip_cents": "0",
                    "total_cents": "2800"
                }
            }
        }
    })
    .to_string()
}

#[tokio::test]
async fn signed_confirmation_schedules_an_order() {
    let ctx = common::setup().await;
    let pool = ctx.state.pool.clone();
    seed_pricing(&pool).await;
    let zone_id = common::seed_zone(&pool, "Downtown", &["10001"]).await;
    let slot_id = common::seed_slot(&pool, zone_id, common::date("2026-09-01"), 4).await;

    let body = session_event("cs_http_1", zone_id, slot_id);
    let verifier = SignatureVerifier::new(
        &ctx.state.config.payment_webhook_secret,
        ctx.state.config.payment_webhook_tolerance_secs,
    );
    let signature = verifier.sign(body.as_bytes(), Utc::now().timestamp());

    let app = api::router(ctx.state.clone());
    let response = app
        .oneshot(
            Request::post("/webhooks/payment")
                .header("content-type", "application/json")
                .header("x-payment-signature", signature)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let order = order::find_by_session(&pool, "cs_http_1")
        .await
        .expect("query")
        .expect("order created");
    assert_eq!(order.status, OrderStatus::Scheduled);
    assert_eq!(order.total_cents, 2800);
}

#[tokio::test]
async fn tampered_payload_is_rejected() {
    let ctx = common::setup().await;
    let pool = ctx.state.pool.clone();
    seed_pricing(&pool).await;
    let zone_id = common::seed_zone(&pool, "Downtown", &["10001"]).await;
    let slot_id = common::seed_slot(&pool, zone_id, common::date("2026-09-01"), 4).await;

    let body = session_event("cs_http_2", zone_id, slot_id);
    let verifier = SignatureVerifier::new(
        &ctx.state.config.payment_webhook_secret,
        ctx.state.config.payment_webhook_tolerance_secs,
    );
    let signature = verifier.sign(body.as_bytes(), Utc::now().timestamp());
    let tampered = body.replace("2800", "100");

    let app = api::router(ctx.state.clone());
    let response = app
        .oneshot(
            Request::post("/webhooks/payment")
                .header("content-type", "application/json")
                .header("x-payment-signature", signature)
                .body(Body::from(tampered))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(
        order::find_by_session(&pool, "cs_http_2")
            .await
            .expect("query")
            .is_none()
    );
}

#[tokio::test]
async fn admin_routes_demand_the_admin_role() {
    let ctx = common::setup().await;

    // No token
    let app = api::router(ctx.state.clone());
    let response = app
        .oneshot(
            Request::put("/api/pricing")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"per_bag_cents":2500,"pickup_fee_cents":300,"min_order_cents":0,"free_pickup_threshold_cents":5000}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Customer token
    let token = ctx
        .state
        .jwt
        .generate_token("cust-1", "cust-1@example.com", pickup_server::Role::Customer)
        .expect("mint token");
    let app = api::router(ctx.state.clone());
    let response = app
        .oneshot(
            Request::put("/api/pricing")
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::from(
                    r#"{"per_bag_cents":2500,"pickup_fee_cents":300,"min_order_cents":0,"free_pickup_threshold_cents":5000}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin token
    let token = ctx
        .state
        .jwt
        .generate_token("adm-1", "adm-1@example.com", pickup_server::Role::Admin)
        .expect("mint token");
    let app = api::router(ctx.state.clone());
    let response = app
        .oneshot(
            Request::put("/api/pricing")
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::from(
                    r#"{"per_bag_cents":2500,"pickup_fee_cents":300,"min_order_cents":0,"free_pickup_threshold_cents":5000}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
