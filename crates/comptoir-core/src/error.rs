//! # Error Types
//!
//! Domain-specific error types for comptoir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  comptoir-core errors (this file)                                      │
//! │  └── CoreError        - Domain rule violations                         │
//! │                                                                         │
//! │  comptoir-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  comptoir-orders errors (separate crate)                               │
//! │  ├── StoreError       - Collaborator contract failures                 │
//! │  └── OrderError       - What the caller of the service sees            │
//! │                                                                         │
//! │  Flow: CoreError → OrderError → transport layer (out of scope)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (status names, ids)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::status::PaymentStatus;

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-facing messages upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A status string does not name any known payment status.
    ///
    /// ## When This Occurs
    /// - Parsing a status value from the database or an API payload
    /// - A caller sends a status the transition table has never heard of
    #[error("Unknown payment status: '{0}'")]
    UnknownStatus(String),

    /// The requested status change is not in the transition table.
    ///
    /// ## When This Occurs
    /// - Same-status no-op requests (e.g. paid → paid)
    /// - Any transition out of a terminal status (refunded, cancelled)
    /// - Skipping steps (e.g. unpaid → refunded)
    #[error("Cannot change payment status from '{from}' to '{to}'")]
    IllegalTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
