//! API route modules
//!
//! One module per resource, each with a `router()` assembling its routes
//! and a `handler` module with the axum handlers. Public surface: zone
//! resolution, slot browsing, quotes, checkout, and the payment webhook.
//! Everything else sits behind `require_auth` / `require_admin` layers.

pub mod checkout;
pub mod health;
pub mod orders;
pub mod pricing;
pub mod slots;
pub mod webhooks;
pub mod zones;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::authenticate;
use crate::core::ServerState;

/// Assemble the application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(zones::router())
        .merge(slots::router())
        .merge(pricing::router())
        .merge(checkout::router())
        .merge(orders::router())
        .merge(webhooks::router())
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
