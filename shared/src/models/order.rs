//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::order::{OrderStatus, PaymentStatus};

/// Order entity
///
/// Created only by the checkout confirmation workflow after verified
/// payment capture; never hard-deleted (cancellation is a status).
/// `total_cents = subtotal_cents + fee_cents + tip_cents`, always recomputed
/// server-side at confirmation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Owning user, None for guest checkout (customer_email is then set)
    pub user_id: Option<String>,
    pub customer_email: Option<String>,
    pub zone_id: i64,
    pub slot_id: i64,
    pub est_bags: i64,
    pub subtotal_cents: i64,
    pub fee_cents: i64,
    pub tip_cents: i64,
    pub total_cents: i64,
    pub instructions: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    /// External payment session id; the idempotency key (UNIQUE)
    pub payment_session_id: String,
    pub driver_id: Option<String>,
    pub assigned_at: Option<DateTime<Utc>>,
    /// Payment was captured but the slot was over capacity; needs an
    /// operator to resolve (refund or manual reassignment)
    pub needs_reconciliation: bool,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Best contact address for notifications
    pub fn contact_email(&self) -> Option<&str> {
        self.customer_email.as_deref()
    }
}

/// Audit trail entry; one row per transition, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderEvent {
    pub id: i64,
    pub order_id: i64,
    /// Wire form of [`crate::order::OrderEventKind`], e.g. "status:scheduled"
    pub kind: String,
    pub created_at: DateTime<Utc>,
}
