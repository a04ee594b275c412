//! Zone API module
//!
//! Public postal-code resolution plus admin management of zones and their
//! postal-code assignments.

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/zones", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new().route("/resolve", get(handler::resolve));

    let admin_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/postal-codes", post(handler::add_postal_code))
        .route(
            "/{id}/postal-codes/{code}",
            axum::routing::delete(handler::remove_postal_code),
        )
        .layer(middleware::from_fn(require_admin));

    public_routes.merge(admin_routes)
}
