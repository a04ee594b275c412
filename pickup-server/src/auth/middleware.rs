//! Authentication middleware
//!
//! Axum middleware for JWT authentication and role gates. Route-level
//! gates only cover the coarse surface; ownership and driver-assignment
//! checks run again inside the lifecycle operations themselves, so no
//! entry point depends on the router alone for authorization.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Authentication middleware; applied to the whole app
///
/// When a bearer token is present it must be valid; the resulting
/// [`CurrentUser`] is injected into request extensions. Requests without a
/// token pass through anonymously (guest slot browsing and checkout), and
/// handlers that need an identity enforce it via [`require_auth`] /
/// [`require_admin`] or an in-handler check.
pub async fn authenticate(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(header) = auth_header else {
        return Ok(next.run(req).await);
    };

    let token = JwtService::extract_from_header(header)
        .ok_or(AppError::InvalidToken)?;

    match state.jwt.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims).map_err(|e| {
                tracing::warn!(target: "security", error = %e, "Token with unusable claims");
                AppError::InvalidToken
            })?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(
                target: "security",
                error = %e,
                uri = %req.uri(),
                "Token validation failed"
            );
            Err(AppError::InvalidToken)
        }
    }
}

/// Require an authenticated actor of any role
pub async fn require_auth(req: Request, next: Next) -> Result<Response, AppError> {
    if req.extensions().get::<CurrentUser>().is_none() {
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(req).await)
}

/// Require the admin role
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;
    if !user.is_admin() {
        tracing::warn!(
            target: "security",
            user_id = %user.id,
            "Admin-only route denied"
        );
        return Err(AppError::forbidden("Admin role required"));
    }
    Ok(next.run(req).await)
}
