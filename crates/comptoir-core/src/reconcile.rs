//! # Reconciliation Planning
//!
//! Pure delta computation for inventory reconciliation. Given a transition
//! kind and an order's line items, this module computes the per-product and
//! per-category quantity deltas that the store layer will apply as two bulk
//! increments. No I/O happens here; the service layer owns the store calls.
//!
//! ## Transition Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Stock/Sold Semantics per Transition Kind                   │
//! │                                                                         │
//! │  ACTIVATION   unpaid|pending_cash → paid                               │
//! │     product:  sold += qty          (stock already reserved at          │
//! │     category: sold += Σ qty         order creation, untouched here)    │
//! │                                                                         │
//! │  REVERSAL     paid → refunded                                          │
//! │     product:  sold -= qty, stock += qty  (back to sellable pool)       │
//! │     category: sold -= Σ qty                                            │
//! │                                                                         │
//! │  RELEASE      unpaid|pending_cash → cancelled                          │
//! │     product:  stock += qty         (reservation released; sold and     │
//! │     category: untouched             categories were never bumped)      │
//! │                                                                         │
//! │  There is no kind for paid → cancelled: the only way back out of       │
//! │  paid is the refund path, which also restores stock.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Aggregation
//! Deltas are aggregated per distinct product and per distinct category via
//! an explicit accumulation map: multiple line items of the same category
//! produce exactly ONE category entry carrying the summed quantity, never one
//! entry per line item. Entry order is first-seen order, so plans are
//! deterministic and directly assertable in tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::status::PaymentStatus;
use crate::types::OrderItem;

// =============================================================================
// Transition Kind
// =============================================================================

/// The reconciliation behavior a legal transition selects.
///
/// Keyed by the *kind* of transition, not only the destination status:
/// `unpaid → cancelled` releases reserved stock while a hypothetical
/// `paid → cancelled` would not mean the same thing (and is illegal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// `unpaid` | `pending_cash` → `paid`.
    Activation,
    /// `paid` → `refunded`.
    Reversal,
    /// `unpaid` | `pending_cash` → `cancelled`.
    Release,
}

impl TransitionKind {
    /// Classifies a transition into its reconciliation kind.
    ///
    /// Returns `None` for pairs outside the transition table. Every legal
    /// pair maps to exactly one kind (verified against
    /// [`PaymentStatus::legal_transitions`] in tests).
    pub fn classify(from: PaymentStatus, to: PaymentStatus) -> Option<TransitionKind> {
        use PaymentStatus::*;
        match (from, to) {
            (Unpaid | PendingCash, Paid) => Some(TransitionKind::Activation),
            (Paid, Refunded) => Some(TransitionKind::Reversal),
            (Unpaid | PendingCash, Cancelled) => Some(TransitionKind::Release),
            _ => None,
        }
    }

    /// Whether this kind produces category deltas at all.
    ///
    /// `Release` touches neither `sold` counters nor categories, so the
    /// reconciler can skip the product→category lookup entirely.
    #[inline]
    pub fn touches_categories(self) -> bool {
        !matches!(self, TransitionKind::Release)
    }

    /// The (stock, sold) delta one line item of quantity `qty` contributes
    /// to its product under this kind.
    #[inline]
    fn product_item_delta(self, qty: i64) -> (i64, i64) {
        match self {
            TransitionKind::Activation => (0, qty),
            TransitionKind::Reversal => (qty, -qty),
            TransitionKind::Release => (qty, 0),
        }
    }

    /// The sold delta one line item of quantity `qty` contributes to its
    /// product's category under this kind.
    #[inline]
    fn category_item_delta(self, qty: i64) -> i64 {
        match self {
            TransitionKind::Activation => qty,
            TransitionKind::Reversal => -qty,
            TransitionKind::Release => 0,
        }
    }
}

// =============================================================================
// Deltas
// =============================================================================

/// Per-product counter deltas for one bulk increment entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDelta {
    pub product_id: String,
    /// Change to `Product::stock`.
    pub stock_delta: i64,
    /// Change to `Product::sold`.
    pub sold_delta: i64,
}

/// Per-category counter delta for one bulk increment entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDelta {
    pub category_id: String,
    /// Change to `Category::sold`.
    pub sold_delta: i64,
}

/// The full set of counter changes one transition implies.
///
/// Consumed by exactly two bulk-write calls: one against the product store,
/// one against the category store. Either list may be empty, in which case
/// the corresponding call is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconciliationPlan {
    /// One entry per distinct product, first-seen order.
    pub products: Vec<ProductDelta>,
    /// One entry per distinct category, first-seen order.
    pub categories: Vec<CategoryDelta>,
}

impl ReconciliationPlan {
    /// True when the transition implies no counter changes at all.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.categories.is_empty()
    }
}

// =============================================================================
// Plan Computation
// =============================================================================

/// Computes the reconciliation plan for a transition.
///
/// `category_of` maps product id → category id for the order's products, as
/// read from the product store. Line items whose product id is missing from
/// the map still produce their product delta (the store treats unknown ids
/// as a no-op, matching upstream bulk-write semantics) but contribute no
/// category delta - that also covers products that simply have no category.
///
/// ## Example
/// ```
/// use comptoir_core::reconcile::{build_plan, TransitionKind};
/// use comptoir_core::types::OrderItem;
/// use std::collections::HashMap;
///
/// let items = vec![OrderItem {
///     product_id: "p1".into(),
///     name: "Mint tea".into(),
///     image: None,
///     category: "drinks".into(),
///     quantity: 3,
///     unit_price_cents: 1200,
/// }];
/// let categories = HashMap::from([("p1".to_string(), "c1".to_string())]);
///
/// let plan = build_plan(TransitionKind::Activation, &items, &categories);
/// assert_eq!(plan.products[0].sold_delta, 3);
/// assert_eq!(plan.categories[0].sold_delta, 3);
/// ```
pub fn build_plan(
    kind: TransitionKind,
    items: &[OrderItem],
    category_of: &HashMap<String, String>,
) -> ReconciliationPlan {
    let mut products: Vec<ProductDelta> = Vec::new();
    let mut product_index: HashMap<String, usize> = HashMap::new();

    let mut categories: Vec<CategoryDelta> = Vec::new();
    let mut category_index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let (stock_delta, sold_delta) = kind.product_item_delta(item.quantity);

        match product_index.get(&item.product_id) {
            Some(&i) => {
                products[i].stock_delta += stock_delta;
                products[i].sold_delta += sold_delta;
            }
            None => {
                product_index.insert(item.product_id.clone(), products.len());
                products.push(ProductDelta {
                    product_id: item.product_id.clone(),
                    stock_delta,
                    sold_delta,
                });
            }
        }

        if !kind.touches_categories() {
            continue;
        }

        if let Some(category_id) = category_of.get(&item.product_id) {
            let sold_delta = kind.category_item_delta(item.quantity);
            match category_index.get(category_id) {
                Some(&i) => categories[i].sold_delta += sold_delta,
                None => {
                    category_index.insert(category_id.clone(), categories.len());
                    categories.push(CategoryDelta {
                        category_id: category_id.clone(),
                        sold_delta,
                    });
                }
            }
        }
    }

    ReconciliationPlan {
        products,
        categories,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use PaymentStatus::*;

    fn item(product_id: &str, quantity: i64) -> OrderItem {
        OrderItem {
            product_id: product_id.to_string(),
            name: format!("Product {product_id}"),
            image: None,
            category: "label".to_string(),
            quantity,
            unit_price_cents: 1000,
        }
    }

    fn categories(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .collect()
    }

    #[test]
    fn test_classify_agrees_with_transition_table() {
        for from in PaymentStatus::ALL {
            for to in PaymentStatus::ALL {
                assert_eq!(
                    TransitionKind::classify(from, to).is_some(),
                    from.can_transition_to(to),
                    "classify vs table for {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_classify_kinds() {
        assert_eq!(
            TransitionKind::classify(Unpaid, Paid),
            Some(TransitionKind::Activation)
        );
        assert_eq!(
            TransitionKind::classify(PendingCash, Paid),
            Some(TransitionKind::Activation)
        );
        assert_eq!(
            TransitionKind::classify(Paid, Refunded),
            Some(TransitionKind::Reversal)
        );
        assert_eq!(
            TransitionKind::classify(Unpaid, Cancelled),
            Some(TransitionKind::Release)
        );
        assert_eq!(
            TransitionKind::classify(PendingCash, Cancelled),
            Some(TransitionKind::Release)
        );
        // The refund path is the only reversal of a paid order.
        assert_eq!(TransitionKind::classify(Paid, Cancelled), None);
    }

    #[test]
    fn test_activation_plan_moves_sold_only() {
        let items = vec![item("p1", 3), item("p2", 2)];
        let map = categories(&[("p1", "c1"), ("p2", "c1")]);

        let plan = build_plan(TransitionKind::Activation, &items, &map);

        assert_eq!(
            plan.products,
            vec![
                ProductDelta {
                    product_id: "p1".into(),
                    stock_delta: 0,
                    sold_delta: 3
                },
                ProductDelta {
                    product_id: "p2".into(),
                    stock_delta: 0,
                    sold_delta: 2
                },
            ]
        );
        // Two items, one category: exactly one entry with the summed quantity.
        assert_eq!(
            plan.categories,
            vec![CategoryDelta {
                category_id: "c1".into(),
                sold_delta: 5
            }]
        );
    }

    #[test]
    fn test_reversal_mirrors_activation_with_opposite_sign() {
        let items = vec![item("p1", 3), item("p2", 2)];
        let map = categories(&[("p1", "c1"), ("p2", "c1")]);

        let activation = build_plan(TransitionKind::Activation, &items, &map);
        let reversal = build_plan(TransitionKind::Reversal, &items, &map);

        for (a, r) in activation.products.iter().zip(&reversal.products) {
            assert_eq!(a.product_id, r.product_id);
            assert_eq!(a.sold_delta, -r.sold_delta);
            // Reversal additionally returns the quantity to the sellable pool.
            assert_eq!(r.stock_delta, a.sold_delta);
        }
        for (a, r) in activation.categories.iter().zip(&reversal.categories) {
            assert_eq!(a.category_id, r.category_id);
            assert_eq!(a.sold_delta, -r.sold_delta);
        }
    }

    #[test]
    fn test_release_restores_stock_and_skips_categories() {
        let items = vec![item("p3", 1)];
        // Category data present, but a release must not touch it.
        let map = categories(&[("p3", "c9")]);

        let plan = build_plan(TransitionKind::Release, &items, &map);

        assert_eq!(
            plan.products,
            vec![ProductDelta {
                product_id: "p3".into(),
                stock_delta: 1,
                sold_delta: 0
            }]
        );
        assert!(plan.categories.is_empty());
        assert!(!TransitionKind::Release.touches_categories());
    }

    #[test]
    fn test_grouping_three_items_two_categories() {
        let items = vec![item("p1", 3), item("p2", 2), item("p3", 4)];
        let map = categories(&[("p1", "c1"), ("p2", "c2"), ("p3", "c1")]);

        let plan = build_plan(TransitionKind::Activation, &items, &map);

        assert_eq!(
            plan.categories,
            vec![
                CategoryDelta {
                    category_id: "c1".into(),
                    sold_delta: 7
                },
                CategoryDelta {
                    category_id: "c2".into(),
                    sold_delta: 2
                },
            ]
        );
    }

    #[test]
    fn test_repeated_product_aggregates_into_one_entry() {
        let items = vec![item("p1", 2), item("p1", 5)];
        let map = categories(&[("p1", "c1")]);

        let plan = build_plan(TransitionKind::Reversal, &items, &map);

        assert_eq!(
            plan.products,
            vec![ProductDelta {
                product_id: "p1".into(),
                stock_delta: 7,
                sold_delta: -7
            }]
        );
        assert_eq!(
            plan.categories,
            vec![CategoryDelta {
                category_id: "c1".into(),
                sold_delta: -7
            }]
        );
    }

    #[test]
    fn test_product_without_category_still_gets_product_delta() {
        let items = vec![item("p1", 3), item("p2", 2)];
        // p2 is unknown to the lookup (deleted product or no category).
        let map = categories(&[("p1", "c1")]);

        let plan = build_plan(TransitionKind::Activation, &items, &map);

        assert_eq!(plan.products.len(), 2);
        assert_eq!(
            plan.categories,
            vec![CategoryDelta {
                category_id: "c1".into(),
                sold_delta: 3
            }]
        );
    }

    #[test]
    fn test_empty_order_yields_empty_plan() {
        let plan = build_plan(TransitionKind::Activation, &[], &HashMap::new());
        assert!(plan.is_empty());
    }
}
