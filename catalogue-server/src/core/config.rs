//! Server Configuration
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |---------------------|--------------------------|------------------------------|
//! | WORK_DIR | /var/lib/catalogue | Work directory (db, images) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | Runtime environment |
//! | PRODUCTS_PAGE_SIZE | 10 | Product listing page size |
//! | CATEGORIES_PAGE_SIZE| 10 | Category listing page size |
//! | IMAGE_PUBLIC_BASE | /images | Public base for image paths |

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding the database file and image blobs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Page size for product listings
    pub products_page_size: u32,
    /// Page size for category listings
    pub categories_page_size: u32,
    /// Public base path prepended to stored image names
    pub image_public_base: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/catalogue".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            products_page_size: std::env::var("PRODUCTS_PAGE_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|&s| s > 0)
                .unwrap_or(10),
            categories_page_size: std::env::var("CATEGORIES_PAGE_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|&s| s > 0)
                .unwrap_or(10),
            image_public_base: std::env::var("IMAGE_PUBLIC_BASE")
                .unwrap_or_else(|_| "/images".into()),
        }
    }

    /// Path of the SQLite database file
    pub fn db_path(&self) -> String {
        format!("{}/catalogue.db", self.work_dir)
    }

    /// Directory holding uploaded image blobs
    pub fn images_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("images")
    }
}
