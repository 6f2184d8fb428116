//! # Domain Types
//!
//! Core domain types shared across the Comptoir workspace.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │    Product      │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  items          │   │  stock          │   │  name           │       │
//! │  │  payment_status │   │  sold           │   │  sold           │       │
//! │  │  paid_at        │   │  category_id    │   └─────────────────┘       │
//! │  │  cancelled_at   │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  Order ──1:N──► OrderItem ──ref──► Product ──ref──► Category           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Counter Semantics
//! `Product::stock` is a point-in-time quantity (units available for sale);
//! `Product::sold` and `Category::sold` are cumulative counters. They are
//! tracked independently - one is never derived from the other across time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::PaymentStatus;

// =============================================================================
// Order
// =============================================================================

/// A customer order.
///
/// Line items and totals are frozen at order-creation time; once a
/// reconciliation begins, only the status-related fields (`payment_status`,
/// `paid_at`, `cancelled_at`, `cancel_reason`) are ever mutated, and only by
/// the status committer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The customer who placed the order.
    pub user_id: String,

    /// Ordered sequence of line items.
    pub items: Vec<OrderItem>,

    /// Order total in cents (smallest currency unit).
    pub total_cents: i64,

    /// Current payment status.
    pub payment_status: PaymentStatus,

    /// Set when the order enters `paid`.
    pub paid_at: Option<DateTime<Utc>>,

    /// Set when the order enters `refunded` or `cancelled`.
    pub cancelled_at: Option<DateTime<Utc>>,

    /// Caller-supplied reason for a refund or cancellation.
    /// Required for those statuses by caller-side validation,
    /// not enforced here.
    pub cancel_reason: Option<String>,

    /// When the order was created.
    pub created_at: DateTime<Utc>,

    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Distinct product ids referenced by the line items, in first-seen order.
    pub fn product_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::with_capacity(self.items.len());
        for item in &self.items {
            if !ids.contains(&item.product_id) {
                ids.push(item.product_id.clone());
            }
        }
        ids
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
/// Uses snapshot pattern to freeze product data at time of ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The product this line refers to.
    pub product_id: String,

    /// Product name at order time (frozen, for display).
    pub name: String,

    /// Product image URL at order time (frozen, for display).
    pub image: Option<String>,

    /// Category label at order time (frozen, for display).
    /// Aggregation uses the product's live category reference, not this.
    pub category: String,

    /// Quantity ordered.
    pub quantity: i64,

    /// Unit price in cents at order time (frozen).
    pub unit_price_cents: i64,
}

impl OrderItem {
    /// Line total before any adjustments (unit price × quantity).
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product with its inventory counters.
///
/// `stock` and `sold` are mutated only via bulk increment operations issued
/// by the inventory reconciler (or by order-creation logic outside this
/// workspace, which reserves stock up front).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Units available for sale. Non-negative.
    pub stock: i64,

    /// Cumulative units sold. Non-negative.
    pub sold: i64,

    /// Category this product belongs to, if any. A product without a
    /// category contributes no category delta during reconciliation.
    pub category_id: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Category
// =============================================================================

/// A product category with its aggregate sold counter.
///
/// `sold` is always the sum of its member products' sold contributions for
/// the order paths that touched it - never computed independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Cumulative units sold across member products. Non-negative.
    pub sold: i64,

    /// When the category was created.
    pub created_at: DateTime<Utc>,

    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
