//! Product-Category Join Repository
//!
//! The relationship is plain data keyed by (product_id, category_id).
//! Reconciliation makes a product's association set exactly equal a
//! desired selection with a minimal add/remove diff.

use super::RepoResult;
use sqlx::SqlitePool;
use std::collections::HashSet;

/// Outcome of a reconciliation: what was actually written
#[derive(Debug, Default, PartialEq)]
pub struct ReconcileOutcome {
    pub added: Vec<i64>,
    pub removed: Vec<i64>,
}

impl ReconcileOutcome {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Current association set for a product
pub async fn category_ids(pool: &SqlitePool, product_id: i64) -> RepoResult<HashSet<i64>> {
    let ids: Vec<i64> =
        sqlx::query_scalar("SELECT category_id FROM product_category WHERE product_id = ?")
            .bind(product_id)
            .fetch_all(pool)
            .await?;
    Ok(ids.into_iter().collect())
}

/// Subset of `ids` that reference an existing category row
async fn known_category_ids(pool: &SqlitePool, ids: &HashSet<i64>) -> RepoResult<HashSet<i64>> {
    if ids.is_empty() {
        return Ok(HashSet::new());
    }

    // Dynamic query: variable number of IN placeholders — keep as runtime query
    let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    let sql = format!("SELECT id FROM category WHERE id IN ({placeholders})");
    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let known = query.fetch_all(pool).await?;
    Ok(known.into_iter().collect())
}

/// Reconcile a product's associations against a desired selection.
///
/// An absent selection clears every association — callers must pass the
/// previous selection explicitly to preserve it. Otherwise the desired
/// set is first intersected with the existing category universe (unknown
/// ids are silently ignored), then applied as two set differences:
/// `desired − current` inserted, `current − desired` deleted, both in one
/// transaction. Re-applying the same selection issues zero writes.
pub async fn reconcile(
    pool: &SqlitePool,
    product_id: i64,
    desired: Option<&HashSet<i64>>,
) -> RepoResult<ReconcileOutcome> {
    let current = category_ids(pool, product_id).await?;

    let desired = match desired {
        Some(ids) => known_category_ids(pool, ids).await?,
        None => HashSet::new(),
    };

    let to_add: Vec<i64> = desired.difference(&current).copied().collect();
    let to_remove: Vec<i64> = current.difference(&desired).copied().collect();

    if to_add.is_empty() && to_remove.is_empty() {
        return Ok(ReconcileOutcome::default());
    }

    let mut tx = pool.begin().await?;
    for category_id in &to_add {
        sqlx::query("INSERT INTO product_category (product_id, category_id) VALUES (?, ?)")
            .bind(product_id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;
    }
    for category_id in &to_remove {
        sqlx::query("DELETE FROM product_category WHERE product_id = ? AND category_id = ?")
            .bind(product_id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    Ok(ReconcileOutcome {
        added: to_add,
        removed: to_remove,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

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

    async fn seed_product(pool: &SqlitePool, id: i64) {
        sqlx::query(
            "INSERT INTO product (id, sku, name, image_name, is_active, created_at, created_by, modified_at, modified_by, version) VALUES (?1, 'sku', 'name', NULL, 1, 0, 'seed', 0, 'seed', 0)",
        )
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn result_equals_selection_intersected_with_universe() {
        let pool = test_pool().await;
        seed_category(&pool, 1, "Beer").await;
        seed_category(&pool, 2, "Wine").await;
        seed_product(&pool, 7).await;

        // Unknown id 99 is silently ignored
        let desired = HashSet::from([1, 2, 99]);
        let outcome = reconcile(&pool, 7, Some(&desired)).await.unwrap();
        assert_eq!(outcome.added.len(), 2);
        assert_eq!(category_ids(&pool, 7).await.unwrap(), HashSet::from([1, 2]));
    }

    #[tokio::test]
    async fn narrowing_selection_removes_only_the_difference() {
        let pool = test_pool().await;
        seed_category(&pool, 1, "Beer").await;
        seed_category(&pool, 2, "Wine").await;
        seed_product(&pool, 7).await;
        reconcile(&pool, 7, Some(&HashSet::from([1, 2]))).await.unwrap();

        let outcome = reconcile(&pool, 7, Some(&HashSet::from([1]))).await.unwrap();
        assert!(outcome.added.is_empty());
        assert_eq!(outcome.removed, vec![2]);
        assert_eq!(category_ids(&pool, 7).await.unwrap(), HashSet::from([1]));
    }

    #[tokio::test]
    async fn absent_selection_clears_all_associations() {
        let pool = test_pool().await;
        seed_category(&pool, 1, "Beer").await;
        seed_category(&pool, 2, "Wine").await;
        seed_product(&pool, 7).await;
        reconcile(&pool, 7, Some(&HashSet::from([1, 2]))).await.unwrap();

        let outcome = reconcile(&pool, 7, None).await.unwrap();
        assert_eq!(outcome.removed.len(), 2);
        assert!(category_ids(&pool, 7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reconcile_is_idempotent() {
        let pool = test_pool().await;
        seed_category(&pool, 1, "Beer").await;
        seed_product(&pool, 7).await;

        let desired = HashSet::from([1]);
        let first = reconcile(&pool, 7, Some(&desired)).await.unwrap();
        assert!(!first.is_noop());

        // Second application: same final state, zero writes
        let second = reconcile(&pool, 7, Some(&desired)).await.unwrap();
        assert!(second.is_noop());
        assert_eq!(category_ids(&pool, 7).await.unwrap(), desired);

        // Clearing twice is also a no-op the second time
        reconcile(&pool, 7, None).await.unwrap();
        let cleared = reconcile(&pool, 7, None).await.unwrap();
        assert!(cleared.is_noop());
    }

    #[tokio::test]
    async fn duplicate_join_row_maps_to_duplicate_not_database() {
        use crate::db::repository::RepoError;

        let pool = test_pool().await;
        seed_category(&pool, 1, "Beer").await;
        seed_product(&pool, 7).await;
        reconcile(&pool, 7, Some(&HashSet::from([1]))).await.unwrap();

        // Second insert of the same pair trips the composite primary key
        let err: RepoError =
            sqlx::query("INSERT INTO product_category (product_id, category_id) VALUES (7, 1)")
                .execute(&pool)
                .await
                .unwrap_err()
                .into();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn empty_selection_behaves_like_absent() {
        let pool = test_pool().await;
        seed_category(&pool, 1, "Beer").await;
        seed_product(&pool, 7).await;
        reconcile(&pool, 7, Some(&HashSet::from([1]))).await.unwrap();

        let outcome = reconcile(&pool, 7, Some(&HashSet::new())).await.unwrap();
        assert_eq!(outcome.removed, vec![1]);
        assert!(category_ids(&pool, 7).await.unwrap().is_empty());
    }
}
