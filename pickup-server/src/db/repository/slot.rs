//! Time Slot Repository
//!
//! The capacity ledger. `reserve` and `release` are single guarded UPDATE
//! statements so the `used_count <= capacity` invariant holds under
//! concurrent reservation attempts; the check and the increment are one
//! atomic statement, never separate application-side steps.

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::TimeSlot;
use sqlx::SqlitePool;

/// Outcome of a reservation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveOutcome {
    Reserved,
    SlotFull,
    NotFound,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<TimeSlot>> {
    let slot = sqlx::query_as::<_, TimeSlot>(
        "SELECT id, zone_id, slot_date, window_start, window_end, capacity, used_count \
         FROM time_slot WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(slot)
}

/// List slots for a zone in an inclusive date range
///
/// Full slots are included (the UI grays them out). Ordering: ascending
/// date, then ascending window start.
pub async fn list_range(
    pool: &SqlitePool,
    zone_id: i64,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> RepoResult<Vec<TimeSlot>> {
    let slots = sqlx::query_as::<_, TimeSlot>(
        "SELECT id, zone_id, slot_date, window_start, window_end, capacity, used_count \
         FROM time_slot WHERE zone_id = ? AND slot_date >= ? AND slot_date <= ? \
         ORDER BY slot_date ASC, window_start ASC",
    )
    .bind(zone_id)
    .bind(date_from)
    .bind(date_to)
    .fetch_all(pool)
    .await?;
    Ok(slots)
}

/// Insert a single generated window
///
/// Returns false when an identical window already exists (INSERT OR IGNORE
/// against the UNIQUE(zone_id, slot_date, window_start, window_end) index).
pub async fn insert_window(
    pool: &SqlitePool,
    zone_id: i64,
    slot_date: NaiveDate,
    window_start: &str,
    window_end: &str,
    capacity: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "INSERT OR IGNORE INTO time_slot \
         (zone_id, slot_date, window_start, window_end, capacity, used_count) \
         VALUES (?, ?, ?, ?, ?, 0)",
    )
    .bind(zone_id)
    .bind(slot_date)
    .bind(window_start)
    .bind(window_end)
    .bind(capacity)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Atomically claim one unit of capacity
///
/// The WHERE clause is the capacity check; two racing callers cannot both
/// win the last seat.
pub async fn reserve(pool: &SqlitePool, id: i64) -> RepoResult<ReserveOutcome> {
    let rows = sqlx::query(
        "UPDATE time_slot SET used_count = used_count + 1 \
         WHERE id = ? AND used_count < capacity",
    )
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() > 0 {
        return Ok(ReserveOutcome::Reserved);
    }
    // Zero rows: either the slot is full or it does not exist
    match find_by_id(pool, id).await? {
        Some(_) => Ok(ReserveOutcome::SlotFull),
        None => Ok(ReserveOutcome::NotFound),
    }
}

/// Return one unit of capacity (order cancellation before fulfillment)
///
/// Floored at zero; releasing an already-empty slot is a no-op.
pub async fn release(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    sqlx::query(
        "UPDATE time_slot SET used_count = used_count - 1 \
         WHERE id = ? AND used_count > 0",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Adjust capacity, never below the current used_count
///
/// Closing a slot = setting capacity to its used_count.
pub async fn set_capacity(pool: &SqlitePool, id: i64, capacity: i64) -> RepoResult<TimeSlot> {
    if capacity <= 0 {
        return Err(RepoError::Validation("Capacity must be positive".into()));
    }
    let rows = sqlx::query("UPDATE time_slot SET capacity = ? WHERE id = ? AND used_count <= ?")
        .bind(capacity)
        .bind(id)
        .bind(capacity)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return match find_by_id(pool, id).await? {
            Some(slot) => Err(RepoError::Validation(format!(
                "Capacity {capacity} is below used count {}",
                slot.used_count
            ))),
            None => Err(RepoError::NotFound(format!("Slot {id} not found"))),
        };
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Slot {id} not found")))
}
