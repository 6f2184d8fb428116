//! # Payment Status & Transition Table
//!
//! The payment-status state machine for orders.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Payment Status Lifecycle                              │
//! │                                                                         │
//! │      ┌──────────┐                                                      │
//! │      │  unpaid  │──────────────┐                                       │
//! │      └────┬─────┘              │                                       │
//! │           │                    ▼                                       │
//! │           │              ┌───────────┐                                 │
//! │           │              │ cancelled │ ◄── terminal                    │
//! │           │              └───────────┘                                 │
//! │           │                    ▲                                       │
//! │      ┌────▼─────────┐          │                                       │
//! │      │ pending_cash │──────────┘                                       │
//! │      └────┬─────────┘                                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │      ┌──────────┐        ┌──────────┐                                  │
//! │      │   paid   │───────►│ refunded │ ◄── terminal                     │
//! │      └──────────┘        └──────────┘                                  │
//! │                                                                         │
//! │  Anything not drawn above is ILLEGAL, including same-status no-ops.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Single Source of Truth
//! [`PaymentStatus::legal_transitions`] is the ONLY place legality is defined.
//! A new status or transition must be added there before any other component
//! reasons about it; everything else (the validator, the reconciler dispatch)
//! derives from or is tested against that table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// =============================================================================
// Payment Status
// =============================================================================

/// The payment status of an order.
///
/// Wire values are snake_case strings (`unpaid`, `pending_cash`, `paid`,
/// `refunded`, `cancelled`) both in JSON payloads and in the database
/// TEXT column, matching the admin API contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Order placed, payment not yet received.
    Unpaid,
    /// Cash-on-delivery order awaiting collection.
    PendingCash,
    /// Payment confirmed.
    Paid,
    /// Paid order reversed; inventory effects undone. Terminal.
    Refunded,
    /// Order abandoned before payment; reservation released. Terminal.
    Cancelled,
}

impl PaymentStatus {
    /// Every status, for exhaustive table-driven tests.
    pub const ALL: [PaymentStatus; 5] = [
        PaymentStatus::Unpaid,
        PaymentStatus::PendingCash,
        PaymentStatus::Paid,
        PaymentStatus::Refunded,
        PaymentStatus::Cancelled,
    ];

    /// The transition table: legal destination statuses from `self`.
    ///
    /// ## The Table
    /// ```text
    /// | from \ to    | paid | refunded | cancelled |
    /// |--------------|------|----------|-----------|
    /// | unpaid       |  ✓   |          |     ✓     |
    /// | pending_cash |  ✓   |          |     ✓     |
    /// | paid         |      |    ✓     |           |
    /// | refunded     |      |          |           |
    /// | cancelled    |      |          |           |
    /// ```
    /// Any pair not listed is illegal, including no-op (same-status)
    /// requests. `refunded` and `cancelled` are terminal.
    pub fn legal_transitions(self) -> &'static [PaymentStatus] {
        match self {
            PaymentStatus::Unpaid => &[PaymentStatus::Paid, PaymentStatus::Cancelled],
            PaymentStatus::PendingCash => &[PaymentStatus::Paid, PaymentStatus::Cancelled],
            PaymentStatus::Paid => &[PaymentStatus::Refunded],
            PaymentStatus::Refunded => &[],
            PaymentStatus::Cancelled => &[],
        }
    }

    /// Checks whether the transition `self → to` is in the table.
    #[inline]
    pub fn can_transition_to(self, to: PaymentStatus) -> bool {
        self.legal_transitions().contains(&to)
    }

    /// A terminal status has no legal outgoing transitions.
    #[inline]
    pub fn is_terminal(self) -> bool {
        self.legal_transitions().is_empty()
    }

    /// Validates the transition `self → to`, failing fast when illegal.
    pub fn validate_transition(self, to: PaymentStatus) -> Result<(), CoreError> {
        if self.can_transition_to(to) {
            Ok(())
        } else {
            Err(CoreError::IllegalTransition { from: self, to })
        }
    }

    /// The wire/database string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::PendingCash => "pending_cash",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "pending_cash" => Ok(PaymentStatus::PendingCash),
            "paid" => Ok(PaymentStatus::Paid),
            "refunded" => Ok(PaymentStatus::Refunded),
            "cancelled" => Ok(PaymentStatus::Cancelled),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
