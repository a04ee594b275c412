use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{
    DisabledGateway, HostedCheckoutGateway, HttpNotifier, NoopNotifier, Notifier, PaymentGateway,
};
use crate::utils::AppError;

/// Server state; shared handles for every request
///
/// Cloneable (Arc-backed) application state holding the configuration, the
/// connection pool, the JWT validator, and the external collaborators.
/// Collaborators are trait objects so tests can substitute them.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt: Arc<JwtService>,
    pub payment: Arc<dyn PaymentGateway>,
    pub notifier: Arc<dyn Notifier>,
}

impl ServerState {
    /// Manual construction (tests build this with mock collaborators)
    pub fn new(
        config: Config,
        pool: SqlitePool,
        jwt: Arc<JwtService>,
        payment: Arc<dyn PaymentGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            pool,
            jwt,
            payment,
            notifier,
        }
    }

    /// Initialize server state from configuration
    ///
    /// Creates the work directory, opens the database (running migrations),
    /// and wires the collaborators from config. Missing payment/notify
    /// credentials degrade to explicit disabled implementations with a
    /// startup warning rather than a crash, so development works offline.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db = DbService::new(&config.database_path()).await?;

        let payment: Arc<dyn PaymentGateway> = if config.payment_api_key.is_empty() {
            tracing::warn!("PAYMENT_API_KEY not set; checkout drafts will fail");
            Arc::new(DisabledGateway)
        } else {
            Arc::new(HostedCheckoutGateway::new(
                config.payment_api_base.clone(),
                config.payment_api_key.clone(),
            ))
        };

        let notifier: Arc<dyn Notifier> = if config.notify_url.is_empty() {
            tracing::warn!("NOTIFY_URL not set; notifications disabled");
            Arc::new(NoopNotifier)
        } else {
            Arc::new(HttpNotifier::new(
                config.notify_url.clone(),
                config.notify_token.clone(),
            ))
        };

        if config.payment_webhook_secret.is_empty() && config.is_production() {
            return Err(AppError::internal(
                "PAYMENT_WEBHOOK_SECRET must be set in production",
            ));
        }

        Ok(Self::new(
            config.clone(),
            db.pool,
            Arc::new(JwtService::with_config(config.jwt.clone())),
            payment,
            notifier,
        ))
    }

    /// Signal an order event to the notification collaborator without
    /// blocking the caller; failures are logged inside the notifier
    pub fn notify_fire_and_forget(&self, order_id: i64, event_kind: String) {
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            notifier.notify(order_id, &event_kind).await;
        });
    }
}
