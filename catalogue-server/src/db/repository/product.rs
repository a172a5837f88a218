//! Product Repository
//!
//! Listing queries always filter on `is_active`; direct id lookup does not,
//! so soft-deleted products stay reachable for detail/audit views.

use super::{AuditStamp, RepoError, RepoResult};
use shared::models::Product;
use sqlx::SqlitePool;

const PRODUCT_SELECT: &str = "SELECT p.id, p.sku, p.name, p.image_name, p.is_active, p.created_at, p.created_by, p.modified_at, p.modified_by, p.version FROM product p";

/// One window of active products, optionally narrowed by a search term.
///
/// A product matches when its SKU or name contains the term, or when any
/// of its associated categories' names does — the transitive match is why
/// the query joins through product_category instead of filtering the
/// product table alone.
pub async fn find_page(
    pool: &SqlitePool,
    filter: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Product>> {
    let rows = match filter {
        Some(term) => {
            let pattern = format!("%{term}%");
            let sql = format!(
                "{PRODUCT_SELECT} WHERE p.is_active = 1 AND (p.sku LIKE ?1 OR p.name LIKE ?1 OR p.id IN (SELECT pc.product_id FROM product_category pc JOIN category c ON pc.category_id = c.id WHERE c.name LIKE ?1)) ORDER BY p.id LIMIT ?2 OFFSET ?3"
            );
            sqlx::query_as::<_, Product>(&sql)
                .bind(pattern)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql =
                format!("{PRODUCT_SELECT} WHERE p.is_active = 1 ORDER BY p.id LIMIT ?1 OFFSET ?2");
            sqlx::query_as::<_, Product>(&sql)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

/// Active products associated with a category
pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "{PRODUCT_SELECT} JOIN product_category pc ON pc.product_id = p.id WHERE pc.category_id = ? AND p.is_active = 1 ORDER BY p.id"
    );
    let rows = sqlx::query_as::<_, Product>(&sql)
        .bind(category_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Direct lookup by id; returns soft-deleted products too
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE p.id = ?");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn create(
    pool: &SqlitePool,
    sku: &str,
    name: &str,
    image_name: Option<&str>,
    stamp: &AuditStamp,
) -> RepoResult<Product> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO product (id, sku, name, image_name, is_active, created_at, created_by, modified_at, modified_by, version) VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6, ?5, ?6, 0)",
    )
    .bind(id)
    .bind(sku)
    .bind(name)
    .bind(image_name)
    .bind(stamp.at)
    .bind(&stamp.by)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Version-checked update; a zero-row write is re-classified by checking
/// existence so callers can tell a lost race from a vanished row.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    sku: &str,
    name: &str,
    image_name: Option<&str>,
    version: i64,
    stamp: &AuditStamp,
) -> RepoResult<Product> {
    let rows = sqlx::query(
        "UPDATE product SET sku = ?1, name = ?2, image_name = ?3, modified_at = ?4, modified_by = ?5, version = version + 1 WHERE id = ?6 AND version = ?7",
    )
    .bind(sku)
    .bind(name)
    .bind(image_name)
    .bind(stamp.at)
    .bind(&stamp.by)
    .bind(id)
    .bind(version)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return if exists(pool, id).await? {
            Err(RepoError::Conflict(format!("Product {id} was modified concurrently")))
        } else {
            Err(RepoError::NotFound(format!("Product {id} not found")))
        };
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Soft delete: flip is_active and stamp the modification. Never removes
/// the row; there is no transition back to active.
pub async fn soft_delete(pool: &SqlitePool, id: i64, stamp: &AuditStamp) -> RepoResult<Product> {
    let rows = sqlx::query(
        "UPDATE product SET is_active = 0, modified_at = ?1, modified_by = ?2, version = version + 1 WHERE id = ?3",
    )
    .bind(stamp.at)
    .bind(&stamp.by)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use sqlx::SqlitePool;

    fn stamp() -> AuditStamp {
        AuditStamp::now("tester")
    }

    async fn seed_product(pool: &SqlitePool, id: i64, sku: &str, name: &str, active: bool) {
        sqlx::query(
            "INSERT INTO product (id, sku, name, image_name, is_active, created_at, created_by, modified_at, modified_by, version) VALUES (?1, ?2, ?3, NULL, ?4, 0, 'seed', 0, 'seed', 0)",
        )
        .bind(id)
        .bind(sku)
        .bind(name)
        .bind(active)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn seed_category(pool: &SqlitePool, id: i64, name: &str) {
        sqlx::query(
            "INSERT INTO category (id, name, created_at, created_by, modified_at, modified_by, version) VALUES (?1, ?2, 0, 'seed', 0, 'seed', 0)",
        )
        .bind(id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn associate(pool: &SqlitePool, product_id: i64, category_id: i64) {
        sqlx::query("INSERT INTO product_category (product_id, category_id) VALUES (?, ?)")
            .bind(product_id)
            .bind(category_id)
            .execute(pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn soft_delete_keeps_row_and_marks_inactive() {
        let pool = test_pool().await;
        let product = create(&pool, "1234", "Lager", None, &stamp()).await.unwrap();
        assert!(product.is_active);

        let deleted = soft_delete(&pool, product.id, &stamp()).await.unwrap();
        assert!(!deleted.is_active);

        // Still reachable by direct id lookup
        let found = find_by_id(&pool, product.id).await.unwrap().unwrap();
        assert!(!found.is_active);

        // Absent from any listing
        let page = find_page(&pool, None, 11, 0).await.unwrap();
        assert!(page.iter().all(|p| p.id != product.id));
    }

    #[tokio::test]
    async fn pages_are_disjoint_and_exhaustive() {
        let pool = test_pool().await;
        seed_product(&pool, 1, "1234", "First", true).await;
        seed_product(&pool, 2, "12342", "Second", true).await;

        // Page size 1 with one probe row each
        let page1 = find_page(&pool, None, 2, 0).await.unwrap();
        assert_eq!(page1[0].id, 1);

        let page2 = find_page(&pool, None, 2, 1).await.unwrap();
        assert_eq!(page2[0].id, 2);

        let page3 = find_page(&pool, None, 2, 2).await.unwrap();
        assert!(page3.is_empty());
    }

    #[tokio::test]
    async fn search_matches_sku_name_and_category_name() {
        let pool = test_pool().await;
        seed_product(&pool, 1, "1234", "Lager", true).await;
        seed_product(&pool, 2, "9999", "Merlot", true).await;
        seed_product(&pool, 3, "8888", "Cheddar", true).await;
        seed_category(&pool, 10, "Beer").await;
        associate(&pool, 1, 10).await;

        // SKU containment
        let by_sku = find_page(&pool, Some("123"), 11, 0).await.unwrap();
        assert_eq!(by_sku.len(), 1);
        assert_eq!(by_sku[0].id, 1);

        // Name containment
        let by_name = find_page(&pool, Some("Merl"), 11, 0).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, 2);

        // Transitive category-name containment
        let by_category = find_page(&pool, Some("Beer"), 11, 0).await.unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].id, 1);

        // No match
        let none = find_page(&pool, Some("zzz"), 11, 0).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn search_skips_inactive_even_on_category_match() {
        let pool = test_pool().await;
        seed_product(&pool, 1, "1234", "Lager", false).await;
        seed_category(&pool, 10, "Beer").await;
        associate(&pool, 1, 10).await;

        let rows = find_page(&pool, Some("Beer"), 11, 0).await.unwrap();
        assert!(rows.is_empty());

        let by_cat = find_by_category(&pool, 10).await.unwrap();
        assert!(by_cat.is_empty());
    }

    #[tokio::test]
    async fn stale_version_update_conflicts() {
        let pool = test_pool().await;
        let product = create(&pool, "1234", "Lager", None, &stamp()).await.unwrap();

        update(&pool, product.id, "1234", "Pilsner", None, product.version, &stamp())
            .await
            .unwrap();

        let err = update(&pool, product.id, "1234", "Stout", None, product.version, &stamp())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Conflict(_)));

        let err = update(&pool, 424242, "x", "y", None, 0, &stamp()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn find_by_category_returns_associated_active_products() {
        let pool = test_pool().await;
        seed_product(&pool, 1, "1234", "Lager", true).await;
        seed_product(&pool, 2, "5678", "Merlot", true).await;
        seed_category(&pool, 10, "Beer").await;
        associate(&pool, 1, 10).await;

        let rows = find_by_category(&pool, 10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
    }
}
