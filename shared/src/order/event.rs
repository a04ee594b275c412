//! Order events - immutable audit facts

use serde::{Deserialize, Serialize};

use super::status::OrderStatus;

/// Kind of an order audit event
///
/// The wire form (`Display`) is what gets persisted in the append-only
/// `order_event` table and handed to the notification collaborator,
/// e.g. `status:scheduled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderEventKind {
    StatusChanged(OrderStatus),
    DriverAssigned,
    DriverUnassigned,
    /// Payment captured but the slot was over capacity
    ReconciliationRequired,
}

impl std::fmt::Display for OrderEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderEventKind::StatusChanged(status) => write!(f, "status:{status}"),
            OrderEventKind::DriverAssigned => write!(f, "driver_assigned"),
            OrderEventKind::DriverUnassigned => write!(f, "driver_unassigned"),
            OrderEventKind::ReconciliationRequired => write!(f, "reconciliation_required"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_events_use_colon_form() {
        let kind = OrderEventKind::StatusChanged(OrderStatus::Scheduled);
        assert_eq!(kind.to_string(), "status:scheduled");
        let kind = OrderEventKind::StatusChanged(OrderStatus::OutForDelivery);
        assert_eq!(kind.to_string(), "status:out_for_delivery");
    }
}
