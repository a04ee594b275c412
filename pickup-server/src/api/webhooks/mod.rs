//! Payment webhook module
//!
//! Authenticated by HMAC signature rather than a bearer token; lives
//! outside the /api prefix like other machine-to-machine callbacks.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/webhooks/payment", post(handler::payment))
}
