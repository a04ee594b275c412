//! Order API module
//!
//! All routes require an authenticated actor; row-level access (owner,
//! assigned driver, admin) is enforced in the handlers and the lifecycle
//! service, not by the router.

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::{require_admin, require_auth};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let user_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/events", get(handler::list_events))
        .route("/{id}/advance", post(handler::advance))
        .route("/{id}/cancel", post(handler::cancel))
        .layer(middleware::from_fn(require_auth));

    let admin_routes = Router::new()
        .route("/{id}/driver", put(handler::assign_driver))
        .layer(middleware::from_fn(require_admin));

    user_routes.merge(admin_routes)
}
