//! Server State
//!
//! Shared handle over the services. Cloning is shallow (pool + Arcs).

use std::sync::Arc;

use crate::core::Config;
use crate::db::DbService;
use crate::services::{CategoriesService, ImageStorage, LocalImageStorage, ProductsService};
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: sqlx::SqlitePool,
    pub storage: Arc<dyn ImageStorage>,
    pub categories: CategoriesService,
    pub products: ProductsService,
}

impl ServerState {
    /// Open the database, prepare the work directory and wire the services
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db = DbService::new(&config.db_path()).await?;

        let storage: Arc<dyn ImageStorage> = Arc::new(LocalImageStorage::new(
            config.images_dir(),
            config.image_public_base.clone(),
        ));

        Ok(Self::with_parts(config.clone(), db.pool, storage))
    }

    /// Wire state from already-built parts (used by tests)
    pub fn with_parts(
        config: Config,
        pool: sqlx::SqlitePool,
        storage: Arc<dyn ImageStorage>,
    ) -> Self {
        let categories = CategoriesService::new(pool.clone(), config.categories_page_size);
        let products =
            ProductsService::new(pool.clone(), storage.clone(), config.products_page_size);
        Self {
            config,
            pool,
            storage,
            categories,
            products,
        }
    }
}
