//! Pricing API module
//!
//! Public quoting against the current configuration; config reads and
//! updates are admin-only.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pricing", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new().route("/quote", get(handler::quote));

    let admin_routes = Router::new()
        .route("/", get(handler::current).put(handler::update))
        .layer(middleware::from_fn(require_admin));

    public_routes.merge(admin_routes)
}
