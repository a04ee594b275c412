//! Order status state machine

use serde::{Deserialize, Serialize};

/// Order status
///
/// Statuses advance strictly forward along [`OrderStatus::FLOW`]; no
/// skipping, no backward transition. `Canceled` is terminal and reachable
/// only from `Scheduled` (before any driver action).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Scheduled,
    PickupEnRoute,
    PickedUp,
    Processing,
    ReadyForDelivery,
    OutForDelivery,
    Delivered,
    Completed,
    Canceled,
}

impl OrderStatus {
    /// The forced forward order of the lifecycle
    pub const FLOW: [OrderStatus; 8] = [
        OrderStatus::Scheduled,
        OrderStatus::PickupEnRoute,
        OrderStatus::PickedUp,
        OrderStatus::Processing,
        OrderStatus::ReadyForDelivery,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Completed,
    ];

    /// The sole legal successor within the flow
    ///
    /// `None` for terminal states (`Completed`, `Canceled`).
    pub fn next(self) -> Option<OrderStatus> {
        let idx = Self::FLOW.iter().position(|s| *s == self)?;
        Self::FLOW.get(idx + 1).copied()
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Canceled)
    }

    /// Cancellation is only legal before any driver action
    pub fn can_cancel(self) -> bool {
        self == OrderStatus::Scheduled
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Scheduled => "scheduled",
            OrderStatus::PickupEnRoute => "pickup_en_route",
            OrderStatus::PickedUp => "picked_up",
            OrderStatus::Processing => "processing",
            OrderStatus::ReadyForDelivery => "ready_for_delivery",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status of an order
///
/// Orders only materialize after capture, so `Paid` is the initial value;
/// `Refunded` is set by an operator during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Refunded,
}
