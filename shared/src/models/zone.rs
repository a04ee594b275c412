//! Zone Model

use serde::{Deserialize, Serialize};

/// Service zone entity
///
/// A zone is a named service area. Its postal codes live in a separate
/// table (`zone_postal_code`) so the one-zone-per-code invariant can be a
/// storage-level UNIQUE constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Zone {
    pub id: i64,
    pub name: String,
    /// Flat pickup fee for this zone, minor currency units
    pub pickup_fee_cents: i64,
}

/// Zone with its postal codes attached (API detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneDetail {
    #[serde(flatten)]
    pub zone: Zone,
    pub postal_codes: Vec<String>,
}

/// Create zone payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCreate {
    pub name: String,
    #[serde(default)]
    pub pickup_fee_cents: i64,
    #[serde(default)]
    pub postal_codes: Vec<String>,
}

/// Update zone payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneUpdate {
    pub name: Option<String>,
    pub pickup_fee_cents: Option<i64>,
}
