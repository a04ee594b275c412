//! Order lifecycle types
//!
//! The status state machine and the audit event kinds. Every actor-facing
//! entry point (customer, driver, admin) goes through the same transition
//! table instead of re-deriving legality per screen.

pub mod event;
pub mod status;

pub use event::OrderEventKind;
pub use status::{OrderStatus, PaymentStatus};
