//! # Product Repository
//!
//! Database operations for products and their inventory counters.
//!
//! ## Delta Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Counter Update Strategy                          │
//! │                                                                     │
//! │  ❌ WRONG: Absolute update (races with concurrent transitions)     │
//! │     UPDATE products SET sold = 7 WHERE id = ?                      │
//! │                                                                     │
//! │  ✅ CORRECT: Delta update                                          │
//! │     UPDATE products SET sold = sold + 3 WHERE id = ?               │
//! │                                                                     │
//! │  Deltas commute, so two reconciliations touching different orders  │
//! │  never clobber each other's counter movements.                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use comptoir_core::{Product, ProductDelta};
use comptoir_orders::{ProductStore, StoreError};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    stock: i64,
    sold: i64,
    category_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            stock: row.stock,
            sold: row.sold,
            category_id: row.category_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, stock, sold, category_id, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.stock)
        .bind(product.sold)
        .bind(&product.category_id)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a product by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, stock, sold, category_id, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Fetches the products for the given ids, category reference included.
    /// Ids with no matching row are simply absent from the result.
    pub async fn get_many_by_ids(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // Runtime-built placeholder list; sqlite has no array binds.
        let placeholders = (1..=ids.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT id, name, stock, sold, category_id, created_at, updated_at \
             FROM products WHERE id IN ({placeholders})"
        );

        let mut query = sqlx::query_as::<_, ProductRow>(&sql);
        for id in ids {
            query = query.bind(id);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Applies all product counter deltas inside one transaction.
    ///
    /// An id with no matching row is a no-op, never an error - upstream
    /// bulk-write semantics for orders whose products were since deleted.
    pub async fn bulk_increment(&self, deltas: &[ProductDelta]) -> DbResult<()> {
        debug!(entries = deltas.len(), "Bulk-incrementing product counters");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for delta in deltas {
            sqlx::query(
                r#"
                UPDATE products SET
                    stock = stock + ?2,
                    sold = sold + ?3,
                    updated_at = ?4
                WHERE id = ?1
                "#,
            )
            .bind(&delta.product_id)
            .bind(delta.stock_delta)
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
impl ProductStore for ProductRepository {
    async fn find_many_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, StoreError> {
        self.get_many_by_ids(ids).await.map_err(StoreError::from)
    }

    async fn bulk_increment(&self, deltas: &[ProductDelta]) -> Result<(), StoreError> {
        ProductRepository::bulk_increment(self, deltas)
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
    use crate::repository::generate_id;

    fn sample_product(id: &str, stock: i64, sold: i64) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            stock,
            sold,
            category_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&sample_product("p1", 10, 0)).await.unwrap();

        let loaded = repo.get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(loaded.stock, 10);
        assert_eq!(loaded.sold, 0);
        assert!(loaded.category_id.is_none());
    }

    #[tokio::test]
    async fn test_get_many_skips_missing_ids() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&sample_product("p1", 5, 0)).await.unwrap();

        let found = repo
            .get_many_by_ids(&["p1".to_string(), "ghost".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "p1");
    }

    #[tokio::test]
    async fn test_bulk_increment_applies_all_deltas() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&sample_product("p1", 10, 4)).await.unwrap();
        repo.insert(&sample_product("p2", 3, 0)).await.unwrap();

        repo.bulk_increment(&[
            ProductDelta {
                product_id: "p1".to_string(),
                stock_delta: 3,
                sold_delta: -3,
            },
            ProductDelta {
                product_id: "p2".to_string(),
                stock_delta: 0,
                sold_delta: 2,
            },
            // Unknown id: must be a silent no-op
            ProductDelta {
                product_id: generate_id(),
                stock_delta: 100,
                sold_delta: 100,
            },
        ])
        .await
        .unwrap();

        let p1 = repo.get_by_id("p1").await.unwrap().unwrap();
        let p2 = repo.get_by_id("p2").await.unwrap().unwrap();
        assert_eq!((p1.stock, p1.sold), (13, 1));
        assert_eq!((p2.stock, p2.sold), (3, 2));
    }
}
