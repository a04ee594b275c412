//! Pricing Config Repository
//!
//! Latest-wins rows: updates insert a new row and readers take the most
//! recent one, so a config change mid-checkout never mutates what an
//! in-flight confirmation is about to re-read.

use super::RepoResult;
use chrono::Utc;
use shared::models::{PricingConfig, PricingUpdate};
use sqlx::SqlitePool;

/// Current pricing config, None when never configured
pub async fn latest(pool: &SqlitePool) -> RepoResult<Option<PricingConfig>> {
    let config = sqlx::query_as::<_, PricingConfig>(
        "SELECT id, per_bag_cents, pickup_fee_cents, min_order_cents, \
         free_pickup_threshold_cents, updated_at \
         FROM pricing_config ORDER BY updated_at DESC, id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;
    Ok(config)
}

/// Current pricing config with the development fallback applied
pub async fn latest_or_default(pool: &SqlitePool) -> RepoResult<PricingConfig> {
    Ok(latest(pool).await?.unwrap_or_default())
}

pub async fn insert(pool: &SqlitePool, data: PricingUpdate) -> RepoResult<PricingConfig> {
    let now = Utc::now();
    let config = sqlx::query_as::<_, PricingConfig>(
        "INSERT INTO pricing_config \
         (per_bag_cents, pickup_fee_cents, min_order_cents, free_pickup_threshold_cents, updated_at) \
         VALUES (?, ?, ?, ?, ?) \
         RETURNING id, per_bag_cents, pickup_fee_cents, min_order_cents, \
         free_pickup_threshold_cents, updated_at",
    )
    .bind(data.per_bag_cents)
    .bind(data.pickup_fee_cents)
    .bind(data.min_order_cents)
    .bind(data.free_pickup_threshold_cents)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(config)
}
