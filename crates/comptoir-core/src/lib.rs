//! # comptoir-core: Pure Business Logic for Comptoir
//!
//! This crate is the **heart** of Comptoir's order back office. It contains
//! the payment-status state machine and the inventory delta math as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Comptoir Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Admin surface (out of scope here)                │   │
//! │  │        auth ──► routing ──► DTO mapping ──► responses           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 comptoir-orders (service layer)                 │   │
//! │  │     apply_payment_status_transition over the store ports        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ comptoir-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  status   │  │ reconcile │  │   types   │  │   error   │  │   │
//! │  │   │ the table │  │  deltas   │  │  Order    │  │ CoreError │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   comptoir-db (Database Layer)                  │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`status`] - `PaymentStatus` and the transition table
//! - [`reconcile`] - Transition kinds and delta plan computation
//! - [`types`] - Domain types (Order, OrderItem, Product, Category)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod reconcile;
pub mod status;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use comptoir_core::PaymentStatus` instead of
// `use comptoir_core::status::PaymentStatus`

pub use error::CoreError;
pub use reconcile::{CategoryDelta, ProductDelta, ReconciliationPlan, TransitionKind};
pub use status::PaymentStatus;
pub use types::*;
