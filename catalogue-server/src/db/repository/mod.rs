//! Repository Module
//!
//! Pool-passing CRUD functions over the catalogue tables. Handlers never
//! touch SQL directly; they go through the service layer, which composes
//! these functions.

pub mod category;
pub mod product;
pub mod product_category;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// An update lost a race with another writer (stale version)
    #[error("Concurrent modification: {0}")]
    Conflict(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Audit stamp applied uniformly by every mutating operation.
///
/// Creation writes it to both the created_* and modified_* columns;
/// any later mutation writes modified_* only.
#[derive(Debug, Clone)]
pub struct AuditStamp {
    pub at: i64,
    pub by: String,
}

impl AuditStamp {
    pub fn now(actor: &str) -> Self {
        Self {
            at: shared::util::now_millis(),
            by: actor.to_string(),
        }
    }
}
