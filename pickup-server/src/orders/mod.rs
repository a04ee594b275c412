//! Order lifecycle service
//!
//! Every status mutation goes through here: the shared transition table
//! decides legality, an explicit authorization check decides who may
//! trigger it, and the write is an optimistic compare-and-swap on the
//! previous status. Each applied transition appends an audit event and
//! signals the notifier fire-and-forget.

use chrono::Utc;
use shared::models::Order;
use shared::order::{OrderEventKind, OrderStatus};

use crate::core::ServerState;
use crate::auth::CurrentUser;
use crate::db::repository::{order, order_event, slot};
use crate::utils::{AppError, AppResult};

async fn load(state: &ServerState, order_id: i64) -> AppResult<Order> {
    order::find_by_id(&state.pool, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))
}

/// May this actor read the order?
///
/// Owner, assigned driver, or admin. Guest orders (no user id) are only
/// visible to staff.
pub fn can_view(actor: &CurrentUser, order: &Order) -> bool {
    actor.is_admin()
        || order.user_id.as_deref() == Some(actor.id.as_str())
        || order.driver_id.as_deref() == Some(actor.id.as_str())
}

/// Advance an order to the next status in the flow
///
/// Only the assigned driver or an admin may advance; the transition table
/// rejects terminal states. A concurrent advance loses the compare-and-swap
/// and surfaces as `Conflict` rather than skipping a step.
pub async fn advance(
    state: &ServerState,
    actor: &CurrentUser,
    order_id: i64,
) -> AppResult<OrderStatus> {
    let order = load(state, order_id).await?;

    if !actor.is_admin() && order.driver_id.as_deref() != Some(actor.id.as_str()) {
        return Err(AppError::forbidden(
            "Only the assigned driver or an admin may advance an order",
        ));
    }

    let next = order.status.next().ok_or_else(|| {
        AppError::illegal_transition(format!(
            "Order {order_id} is {} and cannot advance",
            order.status
        ))
    })?;

    let applied = order::set_status(&state.pool, order_id, order.status, next).await?;
    if !applied {
        return Err(AppError::conflict(format!(
            "Order {order_id} was modified concurrently"
        )));
    }

    order_event::append(&state.pool, order_id, OrderEventKind::StatusChanged(next)).await?;
    state.notify_fire_and_forget(order_id, OrderEventKind::StatusChanged(next).to_string());

    tracing::info!(order_id, from = %order.status, to = %next, actor = %actor.id, "Order advanced");
    Ok(next)
}

/// Cancel an order; legal only while still `scheduled`
///
/// Owner or admin. Releases the reserved slot capacity so the seat goes
/// back on sale.
pub async fn cancel(state: &ServerState, actor: &CurrentUser, order_id: i64) -> AppResult<()> {
    let order = load(state, order_id).await?;

    if !actor.is_admin() && order.user_id.as_deref() != Some(actor.id.as_str()) {
        return Err(AppError::forbidden(
            "Only the order's owner or an admin may cancel it",
        ));
    }

    if !order.status.can_cancel() {
        return Err(AppError::illegal_state(format!(
            "Order {order_id} is {} and can no longer be canceled",
            order.status
        )));
    }

    let applied =
        order::set_status(&state.pool, order_id, order.status, OrderStatus::Canceled).await?;
    if !applied {
        return Err(AppError::conflict(format!(
            "Order {order_id} was modified concurrently"
        )));
    }

    // A reconciliation-flagged order never held a seat; releasing here
    // would hand back capacity owned by a different order.
    if !order.needs_reconciliation {
        slot::release(&state.pool, order.slot_id).await?;
    }
    order_event::append(
        &state.pool,
        order_id,
        OrderEventKind::StatusChanged(OrderStatus::Canceled),
    )
    .await?;
    state.notify_fire_and_forget(
        order_id,
        OrderEventKind::StatusChanged(OrderStatus::Canceled).to_string(),
    );

    tracing::info!(
        order_id,
        actor = %actor.id,
        released_seat = !order.needs_reconciliation,
        "Order canceled"
    );
    Ok(())
}

/// Set or clear the driver assignment (admin)
///
/// Legal only while the order is `scheduled`; assigning also timestamps the
/// assignment, clearing removes both.
pub async fn assign_driver(
    state: &ServerState,
    order_id: i64,
    driver_id: Option<String>,
) -> AppResult<Order> {
    let order = load(state, order_id).await?;
    if order.status != OrderStatus::Scheduled {
        return Err(AppError::illegal_state(format!(
            "Order {order_id} is {}; drivers can only be assigned while scheduled",
            order.status
        )));
    }

    let assigned_at = driver_id.as_ref().map(|_| Utc::now());
    let applied =
        order::assign_driver(&state.pool, order_id, driver_id.as_deref(), assigned_at).await?;
    if !applied {
        // Lost a race with an advance or cancel
        return Err(AppError::conflict(format!(
            "Order {order_id} left the scheduled state concurrently"
        )));
    }

    let kind = if driver_id.is_some() {
        OrderEventKind::DriverAssigned
    } else {
        OrderEventKind::DriverUnassigned
    };
    order_event::append(&state.pool, order_id, kind).await?;

    load(state, order_id).await
}
