//! Order Event Repository
//!
//! Append-only audit trail. One row per transition; rows are never updated
//! or deleted.

use super::RepoResult;
use chrono::Utc;
use shared::models::OrderEvent;
use shared::order::OrderEventKind;
use sqlx::SqlitePool;

pub async fn append(pool: &SqlitePool, order_id: i64, kind: OrderEventKind) -> RepoResult<()> {
    sqlx::query("INSERT INTO order_event (order_id, kind, created_at) VALUES (?, ?, ?)")
        .bind(order_id)
        .bind(kind.to_string())
        .bind(Utc::now())
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_for_order(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderEvent>> {
    let events = sqlx::query_as::<_, OrderEvent>(
        "SELECT id, order_id, kind, created_at FROM order_event \
         WHERE order_id = ? ORDER BY id ASC",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(events)
}
