//! Utilities
//!
//! Error types, response envelope, logging setup.

pub mod error;
pub mod logger;

pub use error::{AppError, AppResponse, ok};

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;
