//! Order Repository
//!
//! Orders are inserted only by the checkout confirmation workflow and are
//! never hard-deleted. The UNIQUE constraint on `payment_session_id` closes
//! the check-then-insert race under duplicate confirmation deliveries, and
//! `set_status` is an optimistic compare-and-swap on the previous status.

use super::{RepoError, RepoResult, is_unique_violation};
use chrono::{DateTime, NaiveDate, Utc};
use shared::models::Order;
use shared::order::{OrderStatus, PaymentStatus};
use sqlx::SqlitePool;

const SELECT_COLS: &str = "id, user_id, customer_email, zone_id, slot_id, est_bags, \
    subtotal_cents, fee_cents, tip_cents, total_cents, instructions, status, \
    payment_status, payment_session_id, driver_id, assigned_at, needs_reconciliation, \
    created_at";

/// New order row, built by the confirmation workflow from verified metadata
/// and server-recomputed amounts
#[derive(Debug, Clone)]
pub struct OrderNew {
    pub user_id: Option<String>,
    pub customer_email: Option<String>,
    pub zone_id: i64,
    pub slot_id: i64,
    pub est_bags: i64,
    pub subtotal_cents: i64,
    pub fee_cents: i64,
    pub tip_cents: i64,
    pub total_cents: i64,
    pub instructions: Option<String>,
    pub payment_session_id: String,
}

pub async fn insert(pool: &SqlitePool, new: OrderNew) -> RepoResult<Order> {
    let now = Utc::now();
    let order = sqlx::query_as::<_, Order>(&format!(
        "INSERT INTO orders \
         (user_id, customer_email, zone_id, slot_id, est_bags, subtotal_cents, fee_cents, \
          tip_cents, total_cents, instructions, status, payment_status, payment_session_id, \
          needs_reconciliation, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?) \
         RETURNING {SELECT_COLS}"
    ))
    .bind(new.user_id)
    .bind(new.customer_email)
    .bind(new.zone_id)
    .bind(new.slot_id)
    .bind(new.est_bags)
    .bind(new.subtotal_cents)
    .bind(new.fee_cents)
    .bind(new.tip_cents)
    .bind(new.total_cents)
    .bind(new.instructions)
    .bind(OrderStatus::Scheduled)
    .bind(PaymentStatus::Paid)
    .bind(&new.payment_session_id)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            RepoError::Duplicate(format!(
                "Order for payment session {} already exists",
                new.payment_session_id
            ))
        } else {
            e.into()
        }
    })?;
    Ok(order)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order =
        sqlx::query_as::<_, Order>(&format!("SELECT {SELECT_COLS} FROM orders WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(order)
}

/// Lookup by the idempotency key
pub async fn find_by_session(pool: &SqlitePool, session_id: &str) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {SELECT_COLS} FROM orders WHERE payment_session_id = ?"
    ))
    .bind(session_id)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

/// Optimistic status write: applied only while the status still equals
/// `from`. Returns false on a concurrent-modification mismatch.
pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE orders SET status = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(id)
        .bind(from)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Set or clear the driver assignment; legal only while scheduled
///
/// Returns false when the order has progressed past `scheduled` (or does
/// not exist); the caller disambiguates.
pub async fn assign_driver(
    pool: &SqlitePool,
    id: i64,
    driver_id: Option<&str>,
    assigned_at: Option<DateTime<Utc>>,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE orders SET driver_id = ?, assigned_at = ? WHERE id = ? AND status = ?",
    )
    .bind(driver_id)
    .bind(assigned_at)
    .bind(id)
    .bind(OrderStatus::Scheduled)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Flag an order for operator review (payment captured, slot over capacity)
pub async fn set_needs_reconciliation(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    sqlx::query("UPDATE orders SET needs_reconciliation = 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_for_user(pool: &SqlitePool, user_id: &str) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {SELECT_COLS} FROM orders WHERE user_id = ? ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// Orders assigned to a driver whose pickup slot falls on a date
pub async fn list_for_driver_on(
    pool: &SqlitePool,
    driver_id: &str,
    date: NaiveDate,
) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT o.id, o.user_id, o.customer_email, o.zone_id, o.slot_id, o.est_bags, \
         o.subtotal_cents, o.fee_cents, o.tip_cents, o.total_cents, o.instructions, o.status, \
         o.payment_status, o.payment_session_id, o.driver_id, o.assigned_at, \
         o.needs_reconciliation, o.created_at \
         FROM orders o JOIN time_slot s ON s.id = o.slot_id \
         WHERE o.driver_id = ? AND s.slot_date = ? \
         ORDER BY s.window_start ASC",
    )
    .bind(driver_id)
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// Admin listing with optional date / status / reconciliation filters
pub async fn list_admin(
    pool: &SqlitePool,
    date: Option<NaiveDate>,
    status: Option<OrderStatus>,
    needs_reconciliation: Option<bool>,
) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT o.id, o.user_id, o.customer_email, o.zone_id, o.slot_id, o.est_bags, \
         o.subtotal_cents, o.fee_cents, o.tip_cents, o.total_cents, o.instructions, o.status, \
         o.payment_status, o.payment_session_id, o.driver_id, o.assigned_at, \
         o.needs_reconciliation, o.created_at \
         FROM orders o JOIN time_slot s ON s.id = o.slot_id \
         WHERE (?1 IS NULL OR s.slot_date = ?1) \
           AND (?2 IS NULL OR o.status = ?2) \
           AND (?3 IS NULL OR o.needs_reconciliation = ?3) \
         ORDER BY o.created_at DESC",
    )
    .bind(date)
    .bind(status)
    .bind(needs_reconciliation)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}
