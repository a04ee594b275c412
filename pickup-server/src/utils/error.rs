//! Unified error handling
//!
//! Application error type and API response envelope:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - API response structure
//!
//! # Error code scheme
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E1xxx  | Auth     | E1001 not logged in |
//! | E2xxx  | Domain   | E2003 slot full |
//! | E9xxx  | System   | E9002 database error |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Unified API response envelope
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code ("E0000" means success)
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
///
/// Mirrors the domain taxonomy: invalid input, not found, conflict,
/// capacity exhaustion, authorization, state machine violations, and
/// collaborator/system failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Auth errors (401/403) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Domain errors (4xx) ==========
    #[error("Invalid request: {0}")]
    Invalid(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Slot is full: {0}")]
    SlotFull(String),

    #[error("Illegal transition: {0}")]
    IllegalTransition(String),

    #[error("Illegal state: {0}")]
    IllegalState(String),

    // ========== System errors (5xx) ==========
    #[error("External collaborator failed: {0}")]
    External(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "E1001", "Please login first"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "E1002", "Invalid token"),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "E1003", msg.as_str()),

            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E2001", msg.as_str()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E2002", msg.as_str()),
            AppError::SlotFull(msg) => (StatusCode::CONFLICT, "E2003", msg.as_str()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E2004", msg.as_str()),
            AppError::IllegalTransition(msg) => (StatusCode::CONFLICT, "E2005", msg.as_str()),
            AppError::IllegalState(msg) => (StatusCode::CONFLICT, "E2006", msg.as_str()),

            AppError::External(msg) => {
                error!(target: "external", error = %msg, "External collaborator failed");
                (StatusCode::BAD_GATEWAY, "E9003", "External service error")
            }
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9002", "Database error")
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error",
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message: message.to_string(),
            data: None,
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Invalid(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn slot_full(msg: impl Into<String>) -> Self {
        Self::SlotFull(msg.into())
    }

    pub fn illegal_transition(msg: impl Into<String>) -> Self {
        Self::IllegalTransition(msg.into())
    }

    pub fn illegal_state(msg: impl Into<String>) -> Self {
        Self::IllegalState(msg.into())
    }

    pub fn external(msg: impl Into<String>) -> Self {
        Self::External(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}
