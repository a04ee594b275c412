//! Checkout API module
//!
//! Open to guests; a bearer token, when present, ties the draft to the
//! signed-in user.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/checkout", post(handler::start))
}
