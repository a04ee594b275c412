//! Notification collaborator
//!
//! Best-effort customer notifications (email etc. rendered and delivered by
//! an external service). Strictly fire-and-forget: a slow or broken
//! notifier must never stall order processing or hold a transaction open,
//! so delivery failures are logged and dropped.

use async_trait::async_trait;
use serde_json::json;

/// Notification contract
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Signal an order event; infallible from the caller's perspective
    async fn notify(&self, order_id: i64, event_kind: &str);
}

/// HTTP notifier posting to the external notification service
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
    service_token: String,
}

impl HttpNotifier {
    pub fn new(endpoint: String, service_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            service_token,
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, order_id: i64, event_kind: &str) {
        let result = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.service_token)
            .json(&json!({ "order_id": order_id, "event": event_kind }))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(order_id, event = event_kind, "Notification dispatched");
            }
            Ok(response) => {
                tracing::warn!(
                    order_id,
                    event = event_kind,
                    status = %response.status(),
                    "Notification service rejected event"
                );
            }
            Err(e) => {
                tracing::warn!(
                    order_id,
                    event = event_kind,
                    error = %e,
                    "Notification delivery failed"
                );
            }
        }
    }
}

/// No-op notifier (notifications disabled, and tests)
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _order_id: i64, _event_kind: &str) {}
}
