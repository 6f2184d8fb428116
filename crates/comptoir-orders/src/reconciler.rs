//! # Inventory Reconciler
//!
//! Applies the stock/sold consequences of a confirmed-legal transition:
//! reads the order's products for their category references, builds the pure
//! delta plan, and issues the two bulk increments.
//!
//! ## Two Bulk Operations, Not N
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order.items (N lines)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_plan (comptoir-core)                                             │
//! │       │                                                                 │
//! │       ├── products:   [(p1, stockΔ, soldΔ), (p2, ...), ...]            │
//! │       └── categories: [(c1, soldΔ), ...]    ← one entry per category   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tokio::join!(products.bulk_increment, categories.bulk_increment)      │
//! │       │         (disjoint collections - concurrency is a throughput    │
//! │       │          optimization, not a correctness requirement)          │
//! │       ▼                                                                 │
//! │  both complete ──► caller may persist the order status                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! If either bulk update fails the reconciliation fails as a whole and the
//! caller leaves the order status untouched.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use comptoir_core::reconcile::{build_plan, ReconciliationPlan, TransitionKind};
use comptoir_core::Order;

use crate::ports::{CategoryStore, ProductStore, StoreResult};

/// Computes and applies counter deltas for one transition.
pub struct InventoryReconciler<P, C> {
    products: Arc<P>,
    categories: Arc<C>,
}

impl<P, C> InventoryReconciler<P, C>
where
    P: ProductStore,
    C: CategoryStore,
{
    /// Creates a reconciler over the two inventory stores.
    pub fn new(products: Arc<P>, categories: Arc<C>) -> Self {
        InventoryReconciler {
            products,
            categories,
        }
    }

    /// Reconciles inventory counters for `order` under `kind`.
    ///
    /// Returns the applied plan so the caller can log it. Fails as a whole
    /// if either bulk update fails; no partial increment is treated as
    /// committed.
    pub async fn apply(&self, order: &Order, kind: TransitionKind) -> StoreResult<ReconciliationPlan> {
        let category_of = self.category_associations(order, kind).await?;
        let plan = build_plan(kind, &order.items, &category_of);

        debug!(
            order_id = %order.id,
            ?kind,
            product_entries = plan.products.len(),
            category_entries = plan.categories.len(),
            "Applying reconciliation plan"
        );

        // Disjoint collections, issued concurrently; both must complete
        // before the order status is persisted. Empty lists issue no call.
        let product_update = async {
            if plan.products.is_empty() {
                Ok(())
            } else {
                self.products.bulk_increment(&plan.products).await
            }
        };
        let category_update = async {
            if plan.categories.is_empty() {
                Ok(())
            } else {
                self.categories.bulk_increment(&plan.categories).await
            }
        };

        let (product_result, category_result) = tokio::join!(product_update, category_update);
        product_result?;
        category_result?;

        Ok(plan)
    }

    /// Product id → category id for the order's products.
    ///
    /// A release never needs category data (it touches stock only), so the
    /// lookup is skipped entirely. Products without a category, or ids no
    /// longer resolving to a product, are simply absent from the map.
    async fn category_associations(
        &self,
        order: &Order,
        kind: TransitionKind,
    ) -> StoreResult<HashMap<String, String>> {
        if !kind.touches_categories() {
            return Ok(HashMap::new());
        }

        let ids = order.product_ids();
        let products = self.products.find_many_by_ids(&ids).await?;

        Ok(products
            .into_iter()
            .filter_map(|p| p.category_id.map(|category_id| (p.id, category_id)))
            .collect())
    }
}
