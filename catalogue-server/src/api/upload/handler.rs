//! Image Upload Handler
//!
//! Accepts a multipart image, stores it under a content-hash name and
//! returns the stored key plus its public locator. The key goes on the
//! product as `image_name`; storage failure never rolls back DB state.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_name: String,
    pub original_name: String,
    pub size: usize,
    pub url: String,
}

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// POST /api/upload - store an image, content-hash named for dedup
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::validation("Missing file name"))?;
        let ext = original_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(AppError::validation("Empty file"));
        }

        // Content-hash name: identical bytes land on the same blob
        let stored_name = format!("{}.{ext}", calculate_hash(&data));
        state.storage.upload(&stored_name, &data).await?;

        let url = state.storage.resolve_path(&stored_name);
        tracing::info!(file = %stored_name, size = data.len(), "Image uploaded");

        return Ok(Json(UploadResponse {
            file_name: stored_name,
            original_name,
            size: data.len(),
            url,
        }));
    }

    Err(AppError::validation("No file field in multipart body"))
}
