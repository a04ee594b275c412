//! Checkout workflow
//!
//! Two phases. `start` validates the request against current data, prices
//! it server-side, and opens a hosted payment session carrying the full
//! order intent as metadata; nothing is persisted, so an abandoned
//! checkout leaves no trace. `confirm` runs on the verified payment
//! confirmation: it materializes the order from the echoed metadata,
//! re-pricing from current config, then reserves the slot seat.
//!
//! Confirmation is idempotent on the payment session id and never refuses
//! a paid order: if the slot filled between payment and confirmation the
//! order is still created, flagged for reconciliation instead of rejected.

use serde::{Deserialize, Serialize};
use shared::CheckoutMetadata;
use shared::models::Order;
use shared::order::{OrderEventKind, OrderStatus};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, order, order_event, pricing, slot, zone};
use crate::db::repository::order::OrderNew;
use crate::db::repository::slot::ReserveOutcome;
use crate::pricing::compute_total;
use crate::utils::{AppError, AppResult};

const CURRENCY: &str = "usd";

/// Checkout request from the booking flow
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub postal_code: String,
    pub slot_id: i64,
    pub est_bags: i64,
    #[serde(default)]
    pub tip_cents: i64,
    #[serde(default)]
    pub instructions: Option<String>,
    /// Required for guest checkout; ignored when a signed-in user's
    /// token already carries an email
    #[serde(default)]
    pub customer_email: Option<String>,
}

/// Response handing the client off to the hosted payment page
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRedirect {
    pub session_id: String,
    pub redirect_url: String,
}

/// Outcome of processing one payment confirmation
#[derive(Debug)]
pub enum ConfirmOutcome {
    /// First delivery; order created
    Created(Order),
    /// Repeat delivery of a session already materialized
    Duplicate(Order),
}

/// Phase one: validate, price, and open a payment session
pub async fn start(
    state: &ServerState,
    actor: Option<&CurrentUser>,
    req: CheckoutRequest,
) -> AppResult<CheckoutRedirect> {
    let customer_email = match actor {
        Some(user) => Some(user.email.clone()),
        None => match &req.customer_email {
            Some(email) if !email.trim().is_empty() => Some(email.trim().to_string()),
            _ => {
                return Err(AppError::invalid(
                    "customer_email is required for guest checkout",
                ));
            }
        },
    };

    if req.tip_cents < 0 {
        return Err(AppError::invalid("tip_cents must not be negative"));
    }

    let postal_code = req.postal_code.trim().to_string();
    let zone = zone::resolve(&state.pool, &postal_code)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Postal code {postal_code} is outside our service area"))
        })?;

    let slot = slot::find_by_id(&state.pool, req.slot_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Slot {} not found", req.slot_id)))?;
    if slot.zone_id != zone.id {
        return Err(AppError::invalid(format!(
            "Slot {} does not serve zone {}",
            slot.id, zone.name
        )));
    }
    // Advisory check only; the authoritative guard runs at confirmation
    if slot.is_full() {
        return Err(AppError::slot_full(format!(
            "Slot {} on {} is fully booked",
            slot.id, slot.slot_date
        )));
    }

    let config = pricing::latest_or_default(&state.pool).await?;
    let quote = compute_total(req.est_bags, &config)?;
    let total_cents = quote.total_cents + req.tip_cents;

    let metadata = CheckoutMetadata {
        user_id: actor.map(|u| u.id.clone()),
        customer_email,
        postal_code,
        zone_id: zone.id,
        slot_id: slot.id,
        est_bags: req.est_bags,
        instructions: req.instructions.clone(),
        subtotal_cents: quote.subtotal_cents,
        fee_cents: quote.fee_cents,
        tip_cents: req.tip_cents,
        total_cents,
    };

    let session = state
        .payment
        .create_session(
            total_cents,
            CURRENCY,
            &metadata,
            &state.config.success_url(),
            &state.config.cancel_url(),
        )
        .await?;

    tracing::info!(
        session_id = %session.session_id,
        slot_id = slot.id,
        total_cents,
        "Checkout session opened"
    );
    Ok(CheckoutRedirect {
        session_id: session.session_id,
        redirect_url: session.redirect_url,
    })
}

/// Phase two: materialize the order from a verified payment confirmation
///
/// `amount_captured_cents` is the amount the gateway reports as paid; a
/// mismatch against the recomputed total is logged for audit but does not
/// refuse the paid order.
pub async fn confirm(
    state: &ServerState,
    session_id: &str,
    metadata: CheckoutMetadata,
    amount_captured_cents: Option<i64>,
) -> AppResult<ConfirmOutcome> {
    if let Some(existing) = order::find_by_session(&state.pool, session_id).await? {
        tracing::info!(session_id, order_id = existing.id, "Duplicate confirmation ignored");
        return Ok(ConfirmOutcome::Duplicate(existing));
    }

    if slot::find_by_id(&state.pool, metadata.slot_id).await?.is_none() {
        return Err(AppError::not_found(format!(
            "Slot {} from session {session_id} no longer exists",
            metadata.slot_id
        )));
    }

    // Re-price from current config; the customer paid what the gateway
    // captured, so drift is recorded rather than enforced.
    let config = pricing::latest_or_default(&state.pool).await?;
    let quote = compute_total(metadata.est_bags, &config)?;
    let total_cents = quote.total_cents + metadata.tip_cents;
    if let Some(captured) = amount_captured_cents {
        if captured != total_cents {
            tracing::warn!(
                session_id,
                captured,
                expected = total_cents,
                "Captured amount differs from recomputed total"
            );
        }
    }

    let new = OrderNew {
        user_id: metadata.user_id.clone(),
        customer_email: metadata.customer_email.clone(),
        zone_id: metadata.zone_id,
        slot_id: metadata.slot_id,
        est_bags: metadata.est_bags,
        subtotal_cents: quote.subtotal_cents,
        fee_cents: quote.fee_cents,
        tip_cents: metadata.tip_cents,
        total_cents,
        instructions: metadata.instructions.clone(),
        payment_session_id: session_id.to_string(),
    };

    let order = match order::insert(&state.pool, new).await {
        Ok(order) => order,
        // Lost the insert race with a concurrent delivery of the same session
        Err(RepoError::Duplicate(_)) => {
            let existing = order::find_by_session(&state.pool, session_id)
                .await?
                .ok_or_else(|| {
                    AppError::internal(format!("Session {session_id} vanished after duplicate insert"))
                })?;
            return Ok(ConfirmOutcome::Duplicate(existing));
        }
        Err(err) => return Err(err.into()),
    };

    match slot::reserve(&state.pool, order.slot_id).await? {
        ReserveOutcome::Reserved => {}
        ReserveOutcome::SlotFull | ReserveOutcome::NotFound => {
            // Customer already paid: keep the order, flag it for staff
            order::set_needs_reconciliation(&state.pool, order.id).await?;
            order_event::append(&state.pool, order.id, OrderEventKind::ReconciliationRequired)
                .await?;
            tracing::error!(
                order_id = order.id,
                slot_id = order.slot_id,
                "Paid order could not reserve its slot, reconciliation required"
            );
        }
    }

    order_event::append(
        &state.pool,
        order.id,
        OrderEventKind::StatusChanged(OrderStatus::Scheduled),
    )
    .await?;
    state.notify_fire_and_forget(
        order.id,
        OrderEventKind::StatusChanged(OrderStatus::Scheduled).to_string(),
    );

    tracing::info!(order_id = order.id, session_id, "Order scheduled");
    let order = order::find_by_id(&state.pool, order.id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Order {} vanished after insert", order.id)))?;
    Ok(ConfirmOutcome::Created(order))
}
