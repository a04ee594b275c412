//! Pricing API handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::{PricingConfig, PricingUpdate, Quote};

use crate::core::ServerState;
use crate::db::repository::pricing;
use crate::pricing::compute_total;
use crate::utils::{AppError, AppResult};

#[derive(Deserialize)]
pub struct QuoteQuery {
    pub bags: i64,
}

/// GET /api/pricing/quote?bags= - price a prospective order
pub async fn quote(
    State(state): State<ServerState>,
    Query(query): Query<QuoteQuery>,
) -> AppResult<Json<Quote>> {
    let config = pricing::latest_or_default(&state.pool).await?;
    let quote = compute_total(query.bags, &config)?;
    Ok(Json(quote))
}

/// GET /api/pricing - current configuration
pub async fn current(State(state): State<ServerState>) -> AppResult<Json<PricingConfig>> {
    let config = pricing::latest_or_default(&state.pool).await?;
    Ok(Json(config))
}

/// PUT /api/pricing - install a new configuration (latest-wins row)
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<PricingUpdate>,
) -> AppResult<Json<PricingConfig>> {
    if payload.per_bag_cents < 0
        || payload.pickup_fee_cents < 0
        || payload.min_order_cents < 0
        || payload.free_pickup_threshold_cents < 0
    {
        return Err(AppError::invalid("Pricing amounts must not be negative"));
    }
    let config = pricing::insert(&state.pool, payload).await?;
    tracing::info!(config_id = config.id, "Pricing configuration updated");
    Ok(Json(config))
}
