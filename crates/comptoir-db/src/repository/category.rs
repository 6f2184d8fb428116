//! # Category Repository
//!
//! Database operations for categories and their aggregate sold counter.
//! The counter only ever moves via [`CategoryRepository::bulk_increment`],
//! fed by the reconciler's per-category delta plan.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use comptoir_core::{Category, CategoryDelta};
use comptoir_orders::{CategoryStore, StoreError};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    sold: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            sold: row.sold,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Inserts a new category.
    pub async fn insert(&self, category: &Category) -> DbResult<()> {
        debug!(id = %category.id, name = %category.name, "Inserting category");

        sqlx::query(
            r#"
            INSERT INTO categories (id, name, sold, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(category.sold)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a category by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, name, sold, created_at, updated_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Category::from))
    }

    /// Applies all category counter deltas inside one transaction.
    /// Unknown ids are a silent no-op.
    pub async fn bulk_increment(&self, deltas: &[CategoryDelta]) -> DbResult<()> {
        debug!(entries = deltas.len(), "Bulk-incrementing category counters");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for delta in deltas {
            sqlx::query(
                r#"
                UPDATE categories SET
                    sold = sold + ?2,
                    updated_at = ?3
                WHERE id = ?1
                "#,
            )
            .bind(&delta.category_id)
            .bind(delta.sold_delta)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

// =============================================================================
// Store Port
// =============================================================================

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn bulk_increment(&self, deltas: &[CategoryDelta]) -> Result<(), StoreError> {
        CategoryRepository::bulk_increment(self, deltas)
            .await
            .map_err(StoreError::from)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn sample_category(id: &str, sold: i64) -> Category {
        let now = Utc::now();
        Category {
            id: id.to_string(),
            name: format!("Category {id}"),
            sold,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        repo.insert(&sample_category("c1", 0)).await.unwrap();

        let loaded = repo.get_by_id("c1").await.unwrap().unwrap();
        assert_eq!(loaded.sold, 0);
    }

    #[tokio::test]
    async fn test_bulk_increment_moves_sold_both_ways() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        repo.insert(&sample_category("c1", 5)).await.unwrap();
        repo.insert(&sample_category("c2", 2)).await.unwrap();

        repo.bulk_increment(&[
            CategoryDelta {
                category_id: "c1".to_string(),
                sold_delta: 5,
            },
            CategoryDelta {
                category_id: "c2".to_string(),
                sold_delta: -2,
            },
        ])
        .await
        .unwrap();

        assert_eq!(repo.get_by_id("c1").await.unwrap().unwrap().sold, 10);
        assert_eq!(repo.get_by_id("c2").await.unwrap().unwrap().sold, 0);
    }
}
