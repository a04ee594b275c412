//! Zone API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{Zone, ZoneCreate, ZoneDetail, ZoneUpdate};

use crate::core::ServerState;
use crate::db::repository::zone;
use crate::utils::{AppError, AppResult};

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub postal_code: String,
}

/// GET /api/zones/resolve?postal_code= - public service-area lookup
pub async fn resolve(
    State(state): State<ServerState>,
    Query(query): Query<ResolveQuery>,
) -> AppResult<Json<Zone>> {
    let code = query.postal_code.trim();
    if code.is_empty() {
        return Err(AppError::invalid("postal_code must not be empty"));
    }
    let zone = zone::resolve(&state.pool, code).await?.ok_or_else(|| {
        AppError::not_found(format!("Postal code {code} is outside our service area"))
    })?;
    Ok(Json(zone))
}

/// GET /api/zones - list all zones
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Zone>>> {
    let zones = zone::find_all(&state.pool).await?;
    Ok(Json(zones))
}

/// GET /api/zones/{id} - zone with its postal codes
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ZoneDetail>> {
    let zone = zone::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Zone {id} not found")))?;
    let postal_codes = zone::postal_codes(&state.pool, id).await?;
    Ok(Json(ZoneDetail { zone, postal_codes }))
}

/// POST /api/zones - create a zone with its initial postal codes
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ZoneCreate>,
) -> AppResult<Json<Zone>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::invalid("Zone name must not be empty"));
    }
    if payload.pickup_fee_cents < 0 {
        return Err(AppError::invalid("pickup_fee_cents must not be negative"));
    }
    let zone = zone::create(&state.pool, payload).await?;
    Ok(Json(zone))
}

/// PUT /api/zones/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ZoneUpdate>,
) -> AppResult<Json<Zone>> {
    if matches!(payload.pickup_fee_cents, Some(fee) if fee < 0) {
        return Err(AppError::invalid("pickup_fee_cents must not be negative"));
    }
    let zone = zone::update(&state.pool, id, payload).await?;
    Ok(Json(zone))
}

/// DELETE /api/zones/{id} - refused while the zone still has slots
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<()> {
    let deleted = zone::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Zone {id} not found")));
    }
    Ok(())
}

#[derive(Deserialize)]
pub struct PostalCodePayload {
    pub code: String,
}

/// POST /api/zones/{id}/postal-codes - assign a postal code to the zone
pub async fn add_postal_code(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PostalCodePayload>,
) -> AppResult<Json<ZoneDetail>> {
    let code = payload.code.trim();
    if code.is_empty() {
        return Err(AppError::invalid("Postal code must not be empty"));
    }
    zone::add_postal_code(&state.pool, id, code).await?;
    get_by_id(State(state), Path(id)).await
}

/// DELETE /api/zones/{id}/postal-codes/{code}
pub async fn remove_postal_code(
    State(state): State<ServerState>,
    Path((id, code)): Path<(i64, String)>,
) -> AppResult<()> {
    let removed = zone::remove_postal_code(&state.pool, id, &code).await?;
    if !removed {
        return Err(AppError::not_found(format!(
            "Postal code {code} is not assigned to zone {id}"
        )));
    }
    Ok(())
}
