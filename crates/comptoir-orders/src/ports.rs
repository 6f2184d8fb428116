//! # Store Ports
//!
//! The narrow contracts this service consumes from its persistence
//! collaborators. `comptoir-db` implements them with SQLite repositories;
//! tests implement them with in-memory doubles.
//!
//! ## Contract Notes
//! - `bulk_increment` is a single store operation applying per-entity deltas
//!   to many entities in one call. An unknown id inside a bulk increment is a
//!   no-op, never an error, matching upstream bulk-write semantics.
//! - Timeout/retry policy belongs to the implementing store, not to this
//!   service.

use async_trait::async_trait;
use thiserror::Error;

use comptoir_core::{CategoryDelta, Order, Product, ProductDelta};

// =============================================================================
// Store Error
// =============================================================================

/// A failure inside a store collaborator.
///
/// Deliberately flat: the service only needs to distinguish "the entity is
/// not there" from "the backend misbehaved", and to carry enough text for
/// the caller to log a precise message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The backing store failed (connection, query, transaction, ...).
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Ports
// =============================================================================

/// Read/write access to orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Loads an order by id. `Ok(None)` when it does not exist.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Order>>;

    /// Persists the order's mutable (status-related) fields.
    async fn save(&self, order: &Order) -> StoreResult<()>;
}

/// Read access to products plus the bulk counter update.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetches the products for the given ids, each carrying its category
    /// reference. Ids with no matching product are simply absent from the
    /// result.
    async fn find_many_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Product>>;

    /// Applies all product counter deltas as one bulk operation.
    async fn bulk_increment(&self, deltas: &[ProductDelta]) -> StoreResult<()>;
}

/// Bulk counter update for categories.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Applies all category counter deltas as one bulk operation.
    async fn bulk_increment(&self, deltas: &[CategoryDelta]) -> StoreResult<()>;
}
