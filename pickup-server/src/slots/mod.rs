//! Slot scheduling service
//!
//! Admin bulk generation of pickup windows and the validation in front of
//! the capacity ledger. The ledger itself (reserve/release) lives in
//! `db::repository::slot` as guarded statements.

use chrono::{Duration, NaiveTime};
use shared::models::{GenerateWindowsReport, GenerateWindowsRequest, TimeSlot};
use sqlx::SqlitePool;

use crate::db::repository::{slot, zone};
use crate::utils::{AppError, AppResult};

fn parse_window(label: &str, value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::invalid(format!("Invalid {label} time {value:?}, expected HH:MM")))
}

/// Bulk-create one slot per calendar day in the inclusive range
///
/// Regeneration over an overlapping range is idempotent: days whose window
/// already exists are skipped and only counted in `requested`.
pub async fn generate_windows(
    pool: &SqlitePool,
    req: GenerateWindowsRequest,
) -> AppResult<GenerateWindowsReport> {
    if req.capacity <= 0 {
        return Err(AppError::invalid("Capacity must be positive"));
    }
    let start = parse_window("window start", &req.window_start)?;
    let end = parse_window("window end", &req.window_end)?;
    if start >= end {
        return Err(AppError::invalid("Window start must be before window end"));
    }
    if req.date_from > req.date_to {
        return Err(AppError::invalid("Date range start is after its end"));
    }
    if zone::find_by_id(pool, req.zone_id).await?.is_none() {
        return Err(AppError::not_found(format!("Zone {} not found", req.zone_id)));
    }

    let mut requested = 0;
    let mut created = 0;
    let mut day = req.date_from;
    while day <= req.date_to {
        requested += 1;
        let inserted = slot::insert_window(
            pool,
            req.zone_id,
            day,
            &req.window_start,
            &req.window_end,
            req.capacity,
        )
        .await?;
        if inserted {
            created += 1;
        }
        day += Duration::days(1);
    }

    tracing::info!(
        zone_id = req.zone_id,
        requested,
        created,
        "Generated pickup windows"
    );
    Ok(GenerateWindowsReport { requested, created })
}

/// Adjust a slot's capacity; structure (date/window) stays immutable
pub async fn adjust_capacity(pool: &SqlitePool, slot_id: i64, capacity: i64) -> AppResult<TimeSlot> {
    let slot = slot::set_capacity(pool, slot_id, capacity).await?;
    Ok(slot)
}
