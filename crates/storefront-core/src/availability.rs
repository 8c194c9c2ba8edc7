//! # Availability Rules
//!
//! Time-windowed purchase limits.
//!
//! A lockout rule caps one product at a single unit, and drops the cap to
//! zero while any order for that product is younger than the window:
//!
//! ```text
//!   ◄──────────── window ────────────►
//! ──┼─────────────────────────────────┼──► time
//!   now - window                      now
//!
//!   order for product in range?   yes → itemLimit 0
//!                                  no → itemLimit 1
//! ```
//!
//! The store query lives elsewhere; this module only does the time math.

use chrono::{DateTime, Duration, Utc};

use crate::id::DocumentId;

/// Item limit while no recent order exists.
pub const AVAILABLE_LIMIT: u32 = 1;

/// Item limit while a recent order exists.
pub const LOCKED_LIMIT: u32 = 0;

/// Lockout window and the product it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockoutRule {
    pub product_id: DocumentId,
    pub window: Duration,
}

impl LockoutRule {
    pub fn new(product_id: DocumentId, window: Duration) -> Self {
        LockoutRule { product_id, window }
    }

    /// Returns true if the rule governs `product_id`.
    pub fn applies_to(&self, product_id: &DocumentId) -> bool {
        &self.product_id == product_id
    }

    /// Earliest order time that still counts as recent.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.window
    }

    /// Item limit given whether a recent order was found.
    pub fn limit(&self, recently_ordered: bool) -> u32 {
        if recently_ordered {
            LOCKED_LIMIT
        } else {
            AVAILABLE_LIMIT
        }
    }
}
