//! Shared test fixtures
//!
//! Each test gets its own temporary SQLite database with migrations
//! applied, a state wired with inert collaborators, and seed helpers for
//! zones, slots, and pricing.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tempfile::TempDir;

use pickup_server::auth::{CurrentUser, JwtService, Role};
use pickup_server::core::{Config, ServerState};
use pickup_server::db::DbService;
use pickup_server::services::{DisabledGateway, NoopNotifier};

pub struct TestContext {
    pub state: ServerState,
    // Dropped last; keeps the database file alive for the test's duration
    _work_dir: TempDir,
}

pub async fn setup() -> TestContext {
    let work_dir = TempDir::new().expect("create temp work dir");
    let mut config = Config::with_overrides(work_dir.path().to_str().unwrap(), 0);
    config.payment_webhook_secret = "whsec_test".to_string();

    let db = DbService::new(&config.database_path())
        .await
        .expect("open test database");

    let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
    let state = ServerState::new(
        config,
        db.pool,
        jwt,
        Arc::new(DisabledGateway),
        Arc::new(NoopNotifier),
    );

    TestContext {
        state,
        _work_dir: work_dir,
    }
}

pub fn customer(id: &str) -> CurrentUser {
    CurrentUser {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        role: Role::Customer,
    }
}

pub fn driver(id: &str) -> CurrentUser {
    CurrentUser {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        role: Role::Driver,
    }
}

pub fn admin(id: &str) -> CurrentUser {
    CurrentUser {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        role: Role::Admin,
    }
}

pub async fn seed_zone(pool: &SqlitePool, name: &str, codes: &[&str]) -> i64 {
    let zone_id: i64 =
        sqlx::query_scalar("INSERT INTO zone (name, pickup_fee_cents) VALUES (?, 0) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
            .expect("insert zone");
    for code in codes {
        sqlx::query("INSERT INTO zone_postal_code (zone_id, code) VALUES (?, ?)")
            .bind(zone_id)
            .bind(code)
            .execute(pool)
            .await
            .expect("insert postal code");
    }
    zone_id
}

pub async fn seed_slot(pool: &SqlitePool, zone_id: i64, date: NaiveDate, capacity: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO time_slot (zone_id, slot_date, window_start, window_end, capacity, used_count) \
         VALUES (?, ?, '09:00', '12:00', ?, 0) RETURNING id",
    )
    .bind(zone_id)
    .bind(date)
    .bind(capacity)
    .fetch_one(pool)
    .await
    .expect("insert slot")
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date literal")
}
