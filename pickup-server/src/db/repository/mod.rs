//! Repository Module
//!
//! CRUD and conditional-update operations over the SQLite tables. Free
//! async functions taking `&SqlitePool`; anything concurrency-sensitive
//! (slot reservation, order insert, status advance) is a single guarded
//! statement, never read-then-write from application code.

// Location
pub mod zone;

// Scheduling
pub mod slot;

// Pricing
pub mod pricing;

// Orders
pub mod order;
pub mod order_event;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// True when the error is a UNIQUE constraint violation
///
/// Used to turn storage-level uniqueness (postal codes, payment session
/// ids, slot windows) into domain errors instead of opaque DB failures.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
