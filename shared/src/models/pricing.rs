//! Pricing Configuration Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pricing configuration (latest-wins row)
///
/// All amounts are non-negative integers in minor currency units. Read by
/// the pricing engine at checkout time; never trusted from client input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PricingConfig {
    pub id: i64,
    pub per_bag_cents: i64,
    pub pickup_fee_cents: i64,
    pub min_order_cents: i64,
    pub free_pickup_threshold_cents: i64,
    pub updated_at: DateTime<Utc>,
}

impl Default for PricingConfig {
    /// Fallback used when no pricing row has been configured yet
    fn default() -> Self {
        Self {
            id: 0,
            per_bag_cents: 2500,
            pickup_fee_cents: 300,
            min_order_cents: 0,
            free_pickup_threshold_cents: 0,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// Admin update payload; inserts a new latest-wins row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingUpdate {
    pub per_bag_cents: i64,
    pub pickup_fee_cents: i64,
    pub min_order_cents: i64,
    pub free_pickup_threshold_cents: i64,
}

/// Server-computed price breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub subtotal_cents: i64,
    pub fee_cents: i64,
    pub total_cents: i64,
}
