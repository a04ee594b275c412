//! Pickup Server - laundry pickup and delivery scheduling backend
//!
//! # Module structure
//!
//! ```text
//! pickup-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── auth/          # JWT validation, role gates
//! ├── pricing/       # Quote computation
//! ├── slots/         # Window generation, capacity admin
//! ├── checkout/      # Draft and confirmation workflow
//! ├── orders/        # Lifecycle state machine
//! ├── services/      # Payment gateway and notifier clients
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Pool setup, migrations, repositories
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod checkout;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod services;
pub mod slots;
pub mod utils;

pub use auth::{CurrentUser, JwtService, Role};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env, create the working directory, and start logging
pub fn setup_environment() -> Result<Config, AppError> {
    dotenv::dotenv().ok();
    let config = Config::from_env();

    std::fs::create_dir_all(&config.work_dir)
        .map_err(|e| AppError::internal(format!("Cannot create {}: {e}", config.work_dir)))?;

    let log_dir = format!("{}/logs", config.work_dir);
    std::fs::create_dir_all(&log_dir).ok();
    init_logger_with_file(Some(&config.log_level), Some(&log_dir));

    Ok(config)
}
