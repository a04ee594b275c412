//! Shared types for the pickup service
//!
//! Data models, order lifecycle types, and checkout metadata used by the
//! server and by API clients. Pure types only; no I/O lives here.

pub mod checkout;
pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use checkout::CheckoutMetadata;
pub use order::{OrderEventKind, OrderStatus, PaymentStatus};
