//! # Repositories
//!
//! Repository implementations for database operations. Each repository also
//! implements the matching store port from `comptoir-orders`, so the order
//! status service can run directly against SQLite.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderStatusService                                                     │
//! │       │ OrderStore / ProductStore / CategoryStore (ports)              │
//! │       ▼                                                                 │
//! │  OrderRepository / ProductRepository / CategoryRepository               │
//! │       │ sqlx                                                            │
//! │       ▼                                                                 │
//! │  SQLite                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod category;
pub mod order;
pub mod product;

use uuid::Uuid;

/// Generates a new entity id (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
