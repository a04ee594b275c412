//! Slot API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::models::{GenerateWindowsReport, GenerateWindowsRequest, TimeSlot};

use crate::core::ServerState;
use crate::db::repository::slot;
use crate::slots;
use crate::utils::{AppError, AppResult};

#[derive(Deserialize)]
pub struct ListQuery {
    pub zone_id: i64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// GET /api/slots?zone_id=&date_from=&date_to= - availability for booking
///
/// Full slots are returned too so the client can gray them out.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<TimeSlot>>> {
    if query.date_from > query.date_to {
        return Err(AppError::invalid("date_from must not be after date_to"));
    }
    let slots = slot::list_range(&state.pool, query.zone_id, query.date_from, query.date_to)
        .await?;
    Ok(Json(slots))
}

/// POST /api/slots/generate - bulk-create a window across a date range
pub async fn generate(
    State(state): State<ServerState>,
    Json(payload): Json<GenerateWindowsRequest>,
) -> AppResult<Json<GenerateWindowsReport>> {
    let report = slots::generate_windows(&state.pool, payload).await?;
    Ok(Json(report))
}

#[derive(Deserialize)]
pub struct CapacityPayload {
    pub capacity: i64,
}

/// PUT /api/slots/{id}/capacity - resize a window
///
/// Shrinking below the current reservation count is refused.
pub async fn set_capacity(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CapacityPayload>,
) -> AppResult<Json<TimeSlot>> {
    let slot = slots::adjust_capacity(&state.pool, id, payload.capacity).await?;
    Ok(Json(slot))
}
