//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  storefront-api errors (in app)                                        │
//! │  └── ApiError         - What the browser sees ({"error": "..."})       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → ApiError → Client  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::{EMPTY_CART_MESSAGE, INVALID_ORDER_MESSAGE};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every variant is user-correctable and maps to a 400-class response.
/// The `Display` text is echoed to the client verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A calculation was requested for a cart with no lines.
    #[error("{}", EMPTY_CART_MESSAGE)]
    EmptyCart,

    /// A product identifier is not a well-formed document id.
    ///
    /// ## When This Occurs
    /// ```text
    /// cart: [{ productId: "abc", quantity: 1 }]
    ///      │
    ///      ▼
    /// DocumentId::parse("abc") ✗
    ///      │
    ///      ▼
    /// InvalidIdentifier("abc") → 400 "Invalid productId: abc"
    /// ```
    #[error("Invalid productId: {0}")]
    InvalidIdentifier(String),

    /// An order request without cart lines or without a total amount.
    #[error("{}", INVALID_ORDER_MESSAGE)]
    InvalidOrder,

    /// A stored price is negative.
    #[error("Invalid price for product {product_id}: {price}")]
    InvalidPrice { product_id: String, price: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
