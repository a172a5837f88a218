//! Categories Service
//!
//! CRUD plus substring-filtered pagination over categories.

use crate::db::repository::{self, AuditStamp, RepoError, RepoResult};
use shared::models::{Category, CategoryCreate, CategoryUpdate, Page, PageQuery, page};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct CategoriesService {
    pool: SqlitePool,
    page_size: u32,
}

impl CategoriesService {
    pub fn new(pool: SqlitePool, page_size: u32) -> Self {
        Self { pool, page_size }
    }

    /// One page of categories, filtered by name substring
    pub async fn list_page(&self, query: &PageQuery) -> RepoResult<Page<Category>> {
        let (filter, page) = query.resolve();
        let (limit, offset) = page::window(page, self.page_size);
        let rows =
            repository::category::find_page(&self.pool, filter.as_deref(), limit, offset).await?;
        Ok(Page::from_rows(rows, page, self.page_size, filter))
    }

    pub async fn get(&self, id: i64) -> RepoResult<Category> {
        repository::category::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
    }

    pub async fn create(&self, data: CategoryCreate, actor: &str) -> RepoResult<Category> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("Category name cannot be empty".into()));
        }
        repository::category::create(&self.pool, data, &AuditStamp::now(actor)).await
    }

    pub async fn update(&self, id: i64, data: CategoryUpdate, actor: &str) -> RepoResult<Category> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("Category name cannot be empty".into()));
        }
        repository::category::update(&self.pool, id, data, &AuditStamp::now(actor)).await
    }

    /// Hard delete: removes the category row and its join rows
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        repository::category::delete(&self.pool, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn list_page_windows_are_stable() {
        let pool = test_pool().await;
        let service = CategoriesService::new(pool.clone(), 2);
        for i in 1..=5i64 {
            sqlx::query(
                "INSERT INTO category (id, name, created_at, created_by, modified_at, modified_by, version) VALUES (?1, ?2, 0, 'seed', 0, 'seed', 0)",
            )
            .bind(i)
            .bind(format!("Category {i}"))
            .execute(&pool)
            .await
            .unwrap();
        }

        let mut seen = Vec::new();
        for page in 1..=3u32 {
            let result = service
                .list_page(&PageQuery { search: None, filter: None, page: Some(page) })
                .await
                .unwrap();
            seen.extend(result.items.iter().map(|c| c.id));
            assert_eq!(result.has_more, page < 3);
        }
        // Disjoint and exhaustive
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn rejects_blank_name() {
        let pool = test_pool().await;
        let service = CategoriesService::new(pool, 10);
        let err = service
            .create(CategoryCreate { name: "  ".into() }, "tester")
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
