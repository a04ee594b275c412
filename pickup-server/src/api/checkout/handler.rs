//! Checkout API handlers

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::auth::CurrentUser;
use crate::checkout::{self, CheckoutRedirect, CheckoutRequest};
use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/checkout - validate, price, and open a payment session
pub async fn start(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutRedirect>> {
    let actor = user.as_ref().map(|Extension(u)| u);
    let redirect = checkout::start(&state, actor, payload).await?;
    Ok(Json(redirect))
}
