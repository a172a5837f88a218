//! Category Repository

use super::{AuditStamp, RepoError, RepoResult};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use sqlx::SqlitePool;

const CATEGORY_SELECT: &str = "SELECT id, name, created_at, created_by, modified_at, modified_by, version FROM category";

/// All categories ordered by id (the reconciliation/detail universe)
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let sql = format!("{CATEGORY_SELECT} ORDER BY id");
    let rows = sqlx::query_as::<_, Category>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// One window of categories, optionally narrowed by a name substring.
///
/// Ordered by id ascending so repeated calls produce non-overlapping pages.
pub async fn find_page(
    pool: &SqlitePool,
    filter: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Category>> {
    let rows = match filter {
        Some(term) => {
            let pattern = format!("%{term}%");
            let sql = format!("{CATEGORY_SELECT} WHERE name LIKE ?1 ORDER BY id LIMIT ?2 OFFSET ?3");
            sqlx::query_as::<_, Category>(&sql)
                .bind(pattern)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("{CATEGORY_SELECT} ORDER BY id LIMIT ?1 OFFSET ?2");
            sqlx::query_as::<_, Category>(&sql)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let sql = format!("{CATEGORY_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM category WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn create(
    pool: &SqlitePool,
    data: CategoryCreate,
    stamp: &AuditStamp,
) -> RepoResult<Category> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO category (id, name, created_at, created_by, modified_at, modified_by, version) VALUES (?1, ?2, ?3, ?4, ?3, ?4, 0)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(stamp.at)
    .bind(&stamp.by)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

/// Update with optimistic concurrency: the write only lands when the
/// caller's version still matches the row. A zero-row update is
/// re-classified by checking existence.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: CategoryUpdate,
    stamp: &AuditStamp,
) -> RepoResult<Category> {
    let rows = sqlx::query(
        "UPDATE category SET name = ?1, modified_at = ?2, modified_by = ?3, version = version + 1 WHERE id = ?4 AND version = ?5",
    )
    .bind(&data.name)
    .bind(stamp.at)
    .bind(&stamp.by)
    .bind(id)
    .bind(data.version)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return if exists(pool, id).await? {
            Err(RepoError::Conflict(format!("Category {id} was modified concurrently")))
        } else {
            Err(RepoError::NotFound(format!("Category {id} not found")))
        };
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Hard delete a category together with its join rows
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM product_category WHERE category_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if rows.rows_affected() == 0 {
        tx.rollback().await?;
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }

    tx.commit().await?;
    Ok(true)
}
