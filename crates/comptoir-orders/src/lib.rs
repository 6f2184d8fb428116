//! # comptoir-orders: Order Status Transition Service
//!
//! This crate owns the side-effectful half of the payment-status state
//! machine: given a transition request, it validates legality against the
//! table in `comptoir-core`, reconciles inventory counters through the store
//! ports, and commits the new status.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              apply_payment_status_transition(order_id, to)             │
//! │                                                                         │
//! │  1. OrderStore::find_by_id ──────────► NotFound? fail                  │
//! │  2. No status requested? ────────────► return order unchanged          │
//! │  3. Transition table check ──────────► illegal? fail, zero effects     │
//! │  4. InventoryReconciler::apply                                         │
//! │       ├── ProductStore::find_many_by_ids (category refs)               │
//! │       ├── build_plan (pure, comptoir-core)                             │
//! │       └── tokio::join!(                                                │
//! │               ProductStore::bulk_increment,   ← disjoint               │
//! │               CategoryStore::bulk_increment)  ← collections            │
//! │  5. Set status + paid_at / cancelled_at / cancel_reason                │
//! │  6. OrderStore::save                                                   │
//! │  7. OrderStore::find_by_id ──────────► return the persisted order      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency Contract
//! Best-effort multi-document update, not two-phase commit. If a bulk update
//! fails, the status is never persisted (`ReconciliationFailed`, safe to
//! retry). If the order save fails after reconciliation succeeded, a genuine
//! inconsistency window exists and is surfaced distinctly as
//! `PersistenceFailed` - never swallowed.
//!
//! ## Modules
//!
//! - [`ports`] - Store port traits (`OrderStore`, `ProductStore`, `CategoryStore`)
//! - [`reconciler`] - Inventory reconciliation over the ports
//! - [`service`] - The order status committer
//! - [`error`] - Service error kinds

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ports;
pub mod reconciler;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::OrderError;
pub use ports::{CategoryStore, OrderStore, ProductStore, StoreError};
pub use reconciler::InventoryReconciler;
pub use service::OrderStatusService;
