//! Slot API module
//!
//! Public availability browsing; window generation and capacity changes
//! are admin-only.

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/slots", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new().route("/", get(handler::list));

    let admin_routes = Router::new()
        .route("/generate", post(handler::generate))
        .route("/{id}/capacity", put(handler::set_capacity))
        .layer(middleware::from_fn(require_admin));

    public_routes.merge(admin_routes)
}
