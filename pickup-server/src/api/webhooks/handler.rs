//! Payment webhook handler
//!
//! Signature verification runs over the raw body bytes before any JSON
//! parsing. Events other than a completed checkout session are
//! acknowledged and dropped so the gateway stops retrying them.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::CheckoutMetadata;
use std::collections::BTreeMap;

use crate::checkout::{self, ConfirmOutcome};
use crate::core::ServerState;
use crate::services::SignatureVerifier;
use crate::utils::{AppError, AppResult};

const SIGNATURE_HEADER: &str = "x-payment-signature";

#[derive(Deserialize)]
struct WebhookEvent {
    #[serde(rename = "type")]
    kind: String,
    data: WebhookData,
}

#[derive(Deserialize)]
struct WebhookData {
    object: SessionObject,
}

#[derive(Deserialize)]
struct SessionObject {
    id: String,
    #[serde(default)]
    amount_total: Option<i64>,
    #[serde(default)]
    metadata: BTreeMap<String, String>,
}

#[derive(Serialize)]
pub struct WebhookAck {
    pub received: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
}

/// POST /webhooks/payment - gateway event sink
pub async fn payment(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookAck>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::invalid("Missing signature header"))?;

    let verifier = SignatureVerifier::new(
        &state.config.payment_webhook_secret,
        state.config.payment_webhook_tolerance_secs,
    );
    verifier.verify(signature, &body, Utc::now().timestamp())?;

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::invalid(format!("Malformed webhook payload: {e}")))?;

    if event.kind != "checkout.session.completed" {
        tracing::debug!(kind = %event.kind, "Ignoring webhook event");
        return Ok(Json(WebhookAck {
            received: true,
            order_id: None,
        }));
    }

    let session = event.data.object;
    let metadata = CheckoutMetadata::from_map(&session.metadata)
        .map_err(|e| AppError::invalid(format!("Bad session metadata: {e}")))?;

    let outcome = checkout::confirm(&state, &session.id, metadata, session.amount_total).await?;
    let order_id = match outcome {
        ConfirmOutcome::Created(order) | ConfirmOutcome::Duplicate(order) => order.id,
    };

    Ok(Json(WebhookAck {
        received: true,
        order_id: Some(order_id),
    }))
}
