//! Products Service
//!
//! CRUD plus filtered pagination over products joined with categories.
//! Owns the category-reconciliation policy and soft-delete semantics.

use crate::db::repository::{self, AuditStamp, RepoError, RepoResult};
use crate::services::ImageStorage;
use serde::Serialize;
use shared::models::{AssignedCategory, Page, PageQuery, Product, ProductCreate, ProductUpdate, page};
use sqlx::SqlitePool;
use std::collections::HashSet;
use std::sync::Arc;

/// Product detail view: the row, a resolved image locator and the full
/// category universe flagged with per-category assignment.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub image_path: Option<String>,
    pub categories: Vec<AssignedCategory>,
}

#[derive(Clone)]
pub struct ProductsService {
    pool: SqlitePool,
    storage: Arc<dyn ImageStorage>,
    page_size: u32,
}

impl ProductsService {
    pub fn new(pool: SqlitePool, storage: Arc<dyn ImageStorage>, page_size: u32) -> Self {
        Self {
            pool,
            storage,
            page_size,
        }
    }

    /// One page of active products matching the effective filter
    pub async fn list_page(&self, query: &PageQuery) -> RepoResult<Page<Product>> {
        let (filter, page) = query.resolve();
        let (limit, offset) = page::window(page, self.page_size);
        let rows =
            repository::product::find_page(&self.pool, filter.as_deref(), limit, offset).await?;
        Ok(Page::from_rows(rows, page, self.page_size, filter))
    }

    /// Active products associated with a category
    pub async fn list_by_category(&self, category_id: i64) -> RepoResult<Vec<Product>> {
        repository::product::find_by_category(&self.pool, category_id).await
    }

    /// Direct lookup; returns soft-deleted products too
    pub async fn get(&self, id: i64) -> RepoResult<Product> {
        repository::product::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
    }

    /// Detail view with resolved image locator and assignment flags
    pub async fn detail(&self, id: i64) -> RepoResult<ProductDetail> {
        let product = self.get(id).await?;

        let image_path = product
            .image_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(|n| self.storage.resolve_path(n));

        let assigned = repository::product_category::category_ids(&self.pool, id).await?;
        let categories = repository::category::find_all(&self.pool)
            .await?
            .into_iter()
            .map(|c| AssignedCategory {
                assigned: assigned.contains(&c.id),
                category_id: c.id,
                category_name: c.name,
            })
            .collect();

        Ok(ProductDetail {
            product,
            image_path,
            categories,
        })
    }

    pub async fn create(&self, data: ProductCreate, actor: &str) -> RepoResult<Product> {
        if data.sku.trim().is_empty() || data.name.trim().is_empty() {
            return Err(RepoError::Validation("SKU and name cannot be empty".into()));
        }
        let selection = parse_selection(data.selected_categories.as_deref())?;

        let stamp = AuditStamp::now(actor);
        let product = repository::product::create(
            &self.pool,
            &data.sku,
            &data.name,
            data.image_name.as_deref(),
            &stamp,
        )
        .await?;

        repository::product_category::reconcile(&self.pool, product.id, selection.as_ref())
            .await?;

        Ok(product)
    }

    /// Update the row (optimistic concurrency) and reconcile its category
    /// selection. A changed image name deletes the old blob best-effort;
    /// storage and database writes are deliberately uncoupled.
    pub async fn update(&self, id: i64, data: ProductUpdate, actor: &str) -> RepoResult<Product> {
        if data.sku.trim().is_empty() || data.name.trim().is_empty() {
            return Err(RepoError::Validation("SKU and name cannot be empty".into()));
        }
        let selection = parse_selection(data.selected_categories.as_deref())?;

        let previous = self.get(id).await?;

        let stamp = AuditStamp::now(actor);
        let product = repository::product::update(
            &self.pool,
            id,
            &data.sku,
            &data.name,
            data.image_name.as_deref(),
            data.version,
            &stamp,
        )
        .await?;

        repository::product_category::reconcile(&self.pool, id, selection.as_ref()).await?;

        if let Some(old) = previous.image_name.as_deref()
            && !old.is_empty()
            && previous.image_name != product.image_name
            && let Err(e) = self.storage.delete(old).await
        {
            tracing::warn!(image = old, error = %e, "Failed to delete replaced product image");
        }

        Ok(product)
    }

    /// Always a soft delete: the row survives with is_active = false
    pub async fn delete(&self, id: i64, actor: &str) -> RepoResult<Product> {
        repository::product::soft_delete(&self.pool, id, &AuditStamp::now(actor)).await
    }
}

/// Parse a string-encoded category selection.
///
/// Absent means "clear all". Non-numeric entries are a caller error and
/// rejected before any store access; unknown-but-numeric ids are left for
/// reconciliation to ignore.
fn parse_selection(selection: Option<&[String]>) -> RepoResult<Option<HashSet<i64>>> {
    match selection {
        None => Ok(None),
        Some(entries) => entries
            .iter()
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| RepoError::Validation(format!("Invalid category id: '{raw}'")))
            })
            .collect::<Result<HashSet<_>, _>>()
            .map(Some),
    }
}
