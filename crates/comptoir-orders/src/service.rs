//! # Order Status Committer
//!
//! The single entry point this crate exposes:
//! [`OrderStatusService::apply_payment_status_transition`].
//!
//! ## Commit Sequence
//! ```text
//! load order → validate against the table → reconcile counters →
//! set status + timestamps + reason → save → reload → return
//! ```
//! The reload at the end ensures the caller observes exactly what was
//! committed, not an in-memory approximation.
//!
//! ## Race Window (accepted, documented)
//! There is no machine-enforced atomicity between "counters reconciled" and
//! "status persisted". The legality check re-reads the current status inside
//! this request, and terminal statuses reject everything, which bounds a
//! concurrent double-apply to at most one duplicate reconciliation in the
//! narrow window. A per-order single-writer lock or an optimistic version
//! check on the order row would close it; see DESIGN.md.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use comptoir_core::{Order, PaymentStatus, TransitionKind};

use crate::error::{OrderError, OrderResult};
use crate::ports::{CategoryStore, OrderStore, ProductStore, StoreError};
use crate::reconciler::InventoryReconciler;

/// Orchestrates payment-status transitions for orders.
pub struct OrderStatusService<O, P, C> {
    orders: Arc<O>,
    reconciler: InventoryReconciler<P, C>,
}

impl<O, P, C> OrderStatusService<O, P, C>
where
    O: OrderStore,
    P: ProductStore,
    C: CategoryStore,
{
    /// Creates the service over its three store collaborators.
    pub fn new(orders: Arc<O>, products: Arc<P>, categories: Arc<C>) -> Self {
        OrderStatusService {
            orders,
            reconciler: InventoryReconciler::new(products, categories),
        }
    }

    /// Applies a payment-status transition to an order.
    ///
    /// `requested` is the destination status; `None` means no status change
    /// was requested and the order is returned as-is. `cancel_reason` is
    /// stored when supplied - callers are expected to require it for
    /// `refunded` and `cancelled`, but that validation is theirs, not ours.
    ///
    /// ## Errors
    /// - [`OrderError::NotFound`] - unknown order id
    /// - [`OrderError::IllegalTransition`] - pair not in the table; zero side effects
    /// - [`OrderError::ReconciliationFailed`] - bulk update failed; status unchanged
    /// - [`OrderError::PersistenceFailed`] - save/reload failed after reconciliation
    pub async fn apply_payment_status_transition(
        &self,
        order_id: &str,
        requested: Option<PaymentStatus>,
        cancel_reason: Option<String>,
    ) -> OrderResult<Order> {
        let mut order = self.load(order_id).await?.ok_or_else(|| OrderError::NotFound {
            order_id: order_id.to_string(),
        })?;

        let Some(to) = requested else {
            debug!(order_id = %order.id, "No status change requested");
            return Ok(order);
        };

        let from = order.payment_status;

        // The transition table is the single source of truth for legality;
        // the kind drives which counters move. Illegal requests fail fast
        // before any store is touched.
        let Some(kind) = TransitionKind::classify(from, to) else {
            debug!(order_id = %order.id, %from, %to, "Illegal transition rejected");
            return Err(OrderError::IllegalTransition {
                order_id: order.id,
                from,
                to,
            });
        };

        let plan = self
            .reconciler
            .apply(&order, kind)
            .await
            .map_err(|source| OrderError::ReconciliationFailed {
                order_id: order.id.clone(),
                from,
                to,
                source,
            })?;

        let now = Utc::now();
        order.payment_status = to;
        match to {
            PaymentStatus::Paid => order.paid_at = Some(now),
            PaymentStatus::Refunded | PaymentStatus::Cancelled => order.cancelled_at = Some(now),
            _ => {}
        }
        if cancel_reason.is_some() {
            order.cancel_reason = cancel_reason;
        }
        order.updated_at = now;

        if let Err(source) = self.orders.save(&order).await {
            // Counters are already adjusted; this must never look like a
            // clean failure.
            warn!(
                order_id = %order.id, %from, %to,
                "Order save failed after reconciliation - counters and status may disagree"
            );
            return Err(OrderError::PersistenceFailed {
                order_id: order.id,
                source,
            });
        }

        info!(
            order_id = %order.id, %from, %to,
            product_entries = plan.products.len(),
            category_entries = plan.categories.len(),
            "Payment status transition committed"
        );

        // Return the persisted row, not the in-memory copy.
        match self.load(&order.id).await? {
            Some(persisted) => Ok(persisted),
            None => Err(OrderError::PersistenceFailed {
                order_id: order.id.clone(),
                source: StoreError::not_found("Order", order.id),
            }),
        }
    }

    async fn load(&self, order_id: &str) -> OrderResult<Option<Order>> {
        self.orders
            .find_by_id(order_id)
            .await
            .map_err(|source| OrderError::PersistenceFailed {
                order_id: order_id.to_string(),
                source,
            })
    }
}
