//! Catalogue Server - product catalogue management backend
//!
//! # Architecture Overview
//!
//! - **HTTP API** (`api`): RESTful category/product/upload endpoints
//! - **Database** (`db`): embedded SQLite via sqlx, repository layer
//! - **Services** (`services`): catalogue use-cases and image storage
//! - **Core** (`core`): configuration, shared state, server lifecycle
//!
//! # Module Structure
//!
//! ```text
//! catalogue-server/src/
//! ├── core/          # config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── services/      # categories, products, image storage
//! ├── db/            # pool setup, migrations, repositories
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Setup runtime environment: dotenv, work dir, logging
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;

    if config.environment == "production" {
        init_logger_with_file(None, Some(&config.work_dir));
    } else {
        init_logger();
    }

    Ok(config)
}
