//! # Service Error Kinds
//!
//! What the caller of `apply_payment_status_transition` can observe.
//!
//! ## Retry Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NotFound              terminal - the order id resolves to nothing     │
//! │  IllegalTransition     terminal - pick a different request             │
//! │  ReconciliationFailed  retryable - no status change was committed      │
//! │  PersistenceFailed     inspect! - counters may be adjusted while the   │
//! │                        status still shows the old value                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! No error is retried automatically inside this crate; retry policy belongs
//! to the caller. The transport layer (out of scope) maps these kinds onto
//! HTTP responses.

use thiserror::Error;

use comptoir_core::PaymentStatus;

use crate::ports::StoreError;

/// Errors from the order status committer.
///
/// Every variant carries the order id plus, where it exists, the
/// current/requested status pair, so the caller can log or present a
/// precise message without re-reading state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The order id resolves to nothing. Terminal, no retry.
    #[error("No order found: {order_id}")]
    NotFound { order_id: String },

    /// The current/requested pair is not in the transition table.
    /// Terminal; nothing was read from or written to the inventory stores.
    #[error("Cannot change payment status of order {order_id} from '{from}' to '{to}'")]
    IllegalTransition {
        order_id: String,
        from: PaymentStatus,
        to: PaymentStatus,
    },

    /// A bulk counter update failed. The order's status was left unchanged,
    /// so the caller may retry the whole operation.
    #[error(
        "Failed to reconcile product/category counters for order {order_id} \
         ('{from}' -> '{to}'): {source}"
    )]
    ReconciliationFailed {
        order_id: String,
        from: PaymentStatus,
        to: PaymentStatus,
        #[source]
        source: StoreError,
    },

    /// The order save or reload failed after reconciliation succeeded.
    ///
    /// This is the one genuinely inconsistent outcome: inventory counters
    /// may already be adjusted while the persisted status still shows the
    /// old value. Surfaced distinctly so the caller can reconcile manually.
    #[error("Failed to persist order {order_id}: {source}")]
    PersistenceFailed {
        order_id: String,
        #[source]
        source: StoreError,
    },
}

/// Result type for the order status service.
pub type OrderResult<T> = Result<T, OrderError>;

// =============================================================================
// Unit Tests
// =============================================================================
