use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden by environment variable:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | HTTP_PORT | 8080 | HTTP API port |
/// | SITE_URL | http://localhost:5173 | Frontend base for redirect URLs |
/// | PAYMENT_API_BASE | https://api.stripe.com | Gateway API base |
/// | PAYMENT_API_KEY | (empty) | Gateway secret key |
/// | PAYMENT_WEBHOOK_SECRET | (empty) | Webhook signing secret |
/// | PAYMENT_WEBHOOK_TOLERANCE_SECS | 300 | Signature timestamp tolerance |
/// | NOTIFY_URL | (empty) | Notification service endpoint |
/// | NOTIFY_TOKEN | (empty) | Notification service token |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_LEVEL | info | Log filter level |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Frontend base URL (payment success/cancel redirects)
    pub site_url: String,
    /// JWT validation config
    pub jwt: JwtConfig,
    /// Payment gateway API base
    pub payment_api_base: String,
    /// Payment gateway secret key (empty = gateway disabled)
    pub payment_api_key: String,
    /// Webhook signing secret
    pub payment_webhook_secret: String,
    /// Webhook signature timestamp tolerance, seconds
    pub payment_webhook_tolerance_secs: i64,
    /// Notification service endpoint (empty = notifications disabled)
    pub notify_url: String,
    /// Notification service bearer token
    pub notify_token: String,
    /// Running environment: development | staging | production
    pub environment: String,
    /// Log level filter
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            site_url: std::env::var("SITE_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
            jwt: JwtConfig::default(),
            payment_api_base: std::env::var("PAYMENT_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".into()),
            payment_api_key: std::env::var("PAYMENT_API_KEY").unwrap_or_default(),
            payment_webhook_secret: std::env::var("PAYMENT_WEBHOOK_SECRET").unwrap_or_default(),
            payment_webhook_tolerance_secs: std::env::var("PAYMENT_WEBHOOK_TOLERANCE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            notify_url: std::env::var("NOTIFY_URL").unwrap_or_default(),
            notify_token: std::env::var("NOTIFY_TOKEN").unwrap_or_default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Override the work dir and port (test scenarios)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Database file path under the work dir
    pub fn database_path(&self) -> String {
        format!("{}/pickup.db", self.work_dir)
    }

    /// Payment success redirect
    pub fn success_url(&self) -> String {
        format!("{}/success", self.site_url)
    }

    /// Payment cancel redirect
    pub fn cancel_url(&self) -> String {
        format!("{}/cancel", self.site_url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
