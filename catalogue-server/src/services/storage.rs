//! Image Storage Service
//!
//! The catalogue never speaks a blob protocol; it stores an opaque image
//! key on the product and goes through this interface for bytes and
//! locators. Storage writes have no transactional coupling to database
//! writes — a failure in one does not roll back the other.

use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unsupported image: {0}")]
    Unsupported(String),

    #[error("File too large: {0}")]
    TooLarge(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Opaque blob-storage collaborator
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Store image bytes under the given key, overwriting any existing blob
    async fn upload(&self, name: &str, data: &[u8]) -> StorageResult<()>;

    /// Remove the blob if it exists; deleting a missing blob is not an error
    async fn delete(&self, name: &str) -> StorageResult<()>;

    /// Resolve an image key to a retrievable locator
    fn resolve_path(&self, name: &str) -> String;
}

/// Local filesystem implementation, rooted under the work directory
pub struct LocalImageStorage {
    root: PathBuf,
    public_base: String,
}

impl LocalImageStorage {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    /// Resolve a key to its on-disk path. Keys are opaque and caller-supplied;
    /// anything that is not a bare file name (separators, `..`, empty) never
    /// reaches the filesystem.
    fn blob_path(&self, name: &str) -> StorageResult<PathBuf> {
        if name.is_empty() || Path::new(name).file_name() != Some(OsStr::new(name)) {
            return Err(StorageError::Unsupported(format!(
                "image key '{name}' must be a bare file name"
            )));
        }
        Ok(self.root.join(name))
    }

    fn validate(name: &str, data: &[u8]) -> StorageResult<()> {
        if data.len() > MAX_FILE_SIZE {
            return Err(StorageError::TooLarge(format!(
                "maximum size is {} bytes",
                MAX_FILE_SIZE
            )));
        }
        let ext = name.rsplit('.').next().unwrap_or_default().to_lowercase();
        if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
            return Err(StorageError::Unsupported(format!(
                "format '{ext}' not in {SUPPORTED_FORMATS:?}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn upload(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        let path = self.blob_path(name)?;
        Self::validate(name, data)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(path, data).await?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> StorageResult<()> {
        match tokio::fs::remove_file(self.blob_path(name)?).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn resolve_path(&self, name: &str) -> String {
        format!("{}/{}", self.public_base.trim_end_matches('/'), name)
    }
}
