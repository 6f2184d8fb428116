//! # Order Repository
//!
//! Database operations for orders and their line items.
//!
//! ## Mutation Contract
//! Line items and totals are written once at insert time and never updated;
//! [`OrderRepository::save`] only touches the status-related columns
//! (`payment_status`, `paid_at`, `cancelled_at`, `cancel_reason`,
//! `updated_at`). That keeps the repository aligned with the committer's
//! "status fields only" mutation rule.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use comptoir_core::{Order, OrderItem};
use comptoir_orders::{OrderStore, StoreError};

use super::generate_id;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

// =============================================================================
// Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: String,
    user_id: String,
    total_cents: i64,
    payment_status: String,
    paid_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
    cancel_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> DbResult<Order> {
        let payment_status = self
            .payment_status
            .parse()
            .map_err(|e| DbError::CorruptRow(format!("order {}: {e}", self.id)))?;

        Ok(Order {
            id: self.id,
            user_id: self.user_id,
            items,
            total_cents: self.total_cents,
            payment_status,
            paid_at: self.paid_at,
            cancelled_at: self.cancelled_at,
            cancel_reason: self.cancel_reason,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    product_id: String,
    name: String,
    image: Option<String>,
    category: String,
    quantity: i64,
    unit_price_cents: i64,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            product_id: row.product_id,
            name: row.name,
            image: row.image,
            category: row.category,
            quantity: row.quantity,
            unit_price_cents: row.unit_price_cents,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a new order with its line items in one transaction.
    ///
    /// Order creation itself (stock reservation, totals) happens upstream;
    /// this writes the already-built order.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        debug!(id = %order.id, items = order.items.len(), "Inserting order");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, user_id, total_cents, payment_status,
                paid_at, cancelled_at, cancel_reason,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&order.id)
        .bind(&order.user_id)
        .bind(order.total_cents)
        .bind(order.payment_status.as_str())
        .bind(order.paid_at)
        .bind(order.cancelled_at)
        .bind(&order.cancel_reason)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for (position, item) in order.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, position, product_id,
                    name, image, category, quantity, unit_price_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(generate_id())
            .bind(&order.id)
            .bind(position as i64)
            .bind(&item.product_id)
            .bind(&item.name)
            .bind(&item.image)
            .bind(&item.category)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Gets an order by its id, line items assembled in insertion order.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, total_cents, payment_status,
                   paid_at, cancelled_at, cancel_reason,
                   created_at, updated_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items: Vec<OrderItemRow> = sqlx::query_as(
            r#"
            SELECT product_id, name, image, category, quantity, unit_price_cents
            FROM order_items
            WHERE order_id = ?1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let items = items.into_iter().map(OrderItem::from).collect();
        Ok(Some(row.into_order(items)?))
    }

    /// Persists the order's status-related fields.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Order doesn't exist
    pub async fn save_status_fields(&self, order: &Order) -> DbResult<()> {
        debug!(id = %order.id, status = %order.payment_status, "Saving order status");

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                payment_status = ?2,
                paid_at = ?3,
                cancelled_at = ?4,
                cancel_reason = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&order.id)
        .bind(order.payment_status.as_str())
        .bind(order.paid_at)
        .bind(order.cancelled_at)
        .bind(&order.cancel_reason)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", &order.id));
        }

        Ok(())
    }
}

// =============================================================================
// Store Port
// =============================================================================

#[async_trait]
impl OrderStore for OrderRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StoreError> {
        self.get_by_id(id).await.map_err(StoreError::from)
    }

    async fn save(&self, order: &Order) -> Result<(), StoreError> {
        self.save_status_fields(order).await.map_err(StoreError::from)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
