//! Data models
//!
//! Shared between pickup-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY); user and driver IDs are
//! opaque strings issued by the external identity provider.

pub mod order;
pub mod pricing;
pub mod slot;
pub mod zone;

// Re-exports
pub use order::*;
pub use pricing::*;
pub use slot::*;
pub use zone::*;
