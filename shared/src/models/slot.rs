//! Time Slot Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Pickup time slot entity
///
/// A capacity-bounded pickup window on a specific date within a zone.
/// Invariant: `0 <= used_count <= capacity`, enforced by the reservation
/// ledger (guarded UPDATE) and a CHECK constraint in the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TimeSlot {
    pub id: i64,
    pub zone_id: i64,
    pub slot_date: NaiveDate,
    /// Window start, zero-padded "HH:MM"
    pub window_start: String,
    /// Window end, zero-padded "HH:MM"
    pub window_end: String,
    pub capacity: i64,
    pub used_count: i64,
}

impl TimeSlot {
    pub fn is_full(&self) -> bool {
        self.used_count >= self.capacity
    }

    pub fn remaining(&self) -> i64 {
        (self.capacity - self.used_count).max(0)
    }
}

/// Bulk slot generation request (admin)
///
/// Creates one slot per calendar day in the inclusive date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateWindowsRequest {
    pub zone_id: i64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub window_start: String,
    pub window_end: String,
    pub capacity: i64,
}

/// Result of a bulk generation run
///
/// `created` can be lower than `requested` when slots for some days already
/// existed; regeneration over an overlapping range is idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateWindowsReport {
    pub requested: i64,
    pub created: i64,
}
