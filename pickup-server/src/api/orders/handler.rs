//! Order API handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderEvent};
use shared::order::OrderStatus;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{order, order_event};
use crate::orders;
use crate::utils::{AppError, AppResult};

#[derive(Deserialize)]
pub struct ListQuery {
    /// Driver day filter; defaults to today for drivers, no filter for admins
    pub date: Option<NaiveDate>,
    /// Admin only
    pub status: Option<OrderStatus>,
    /// Admin only
    pub needs_reconciliation: Option<bool>,
}

/// GET /api/orders - listing scoped by role
///
/// Customers see their own orders, drivers their assigned pickups for a
/// day, admins everything with optional filters.
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = if user.is_admin() {
        order::list_admin(&state.pool, query.date, query.status, query.needs_reconciliation)
            .await?
    } else if user.is_driver() {
        let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
        order::list_for_driver_on(&state.pool, &user.id, date).await?
    } else {
        order::list_for_user(&state.pool, &user.id).await?
    };
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
    if !orders::can_view(&user, &order) {
        return Err(AppError::forbidden("You do not have access to this order"));
    }
    Ok(Json(order))
}

/// GET /api/orders/{id}/events - audit trail, oldest first
pub async fn list_events(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<OrderEvent>>> {
    let order = order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
    if !orders::can_view(&user, &order) {
        return Err(AppError::forbidden("You do not have access to this order"));
    }
    let events = order_event::list_for_order(&state.pool, id).await?;
    Ok(Json(events))
}

#[derive(Serialize)]
pub struct AdvanceResponse {
    pub status: OrderStatus,
}

/// POST /api/orders/{id}/advance - move to the next status in the flow
pub async fn advance(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<AdvanceResponse>> {
    let status = orders::advance(&state, &user, id).await?;
    Ok(Json(AdvanceResponse { status }))
}

/// POST /api/orders/{id}/cancel - owner or admin, while still scheduled
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<()> {
    orders::cancel(&state, &user, id).await
}

#[derive(Deserialize)]
pub struct AssignDriverPayload {
    /// None clears the assignment
    pub driver_id: Option<String>,
}

/// PUT /api/orders/{id}/driver - set or clear the driver assignment
pub async fn assign_driver(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignDriverPayload>,
) -> AppResult<Json<Order>> {
    if matches!(&payload.driver_id, Some(d) if d.trim().is_empty()) {
        return Err(AppError::invalid("driver_id must not be empty"));
    }
    let order = orders::assign_driver(&state, id, payload.driver_id).await?;
    Ok(Json(order))
}
