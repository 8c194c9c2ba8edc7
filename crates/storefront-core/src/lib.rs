//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains the pricing
//! rules and domain types as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser UI (external)                        │   │
//! │  │    Product List ──► Cart ──► Calculate ──► Place Order          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP/JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront-api (axum)                        │   │
//! │  │    GET /product/, POST /product/calculate, /place-order         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  Engine   │  │   rules   │  │   │
//! │  │   │  Order    │  │ (Decimal) │  │  Rules    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, Order, etc.)
//! - [`id`] - Document identifiers (24 hex digits)
//! - [`money`] - Money type with exact decimal arithmetic
//! - [`pricing`] - Cart pricing engine (pair and member discounts)
//! - [`availability`] - Time-windowed item limit rule
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same cart + same catalog = same result
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Decimal Money**: no binary floats inside calculations
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use storefront_core::{CartLine, DocumentId, Money, PricingEngine, Product};
//!
//! let id = DocumentId::parse("67cfc3218e6716214620f930").unwrap();
//! let product = Product::new(id.clone(), "Orange Set", Money::from_units(100));
//! let catalog = HashMap::from([(id.clone(), product)]);
//!
//! let result = PricingEngine::default().price(&[CartLine::new(id, 5)], &catalog, None);
//!
//! assert_eq!(result.grand_total, Money::from_units(500));
//! assert_eq!(result.final_total, Money::from_units(480));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod error;
pub mod id;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use availability::LockoutRule;
pub use error::{CoreError, CoreResult, ValidationError};
pub use id::DocumentId;
pub use money::Money;
pub use pricing::{
    DiscountCategorizer, MetadataCategorizer, NameKeywordCategorizer, PricingEngine, PricingRules,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Error message for a calculation request without cart lines.
///
/// Clients match on this exact text, so it must not change.
pub const EMPTY_CART_MESSAGE: &str = "Cart cannot be empty";

/// Error message for an order request without cart lines or amount.
pub const INVALID_ORDER_MESSAGE: &str = "Cart cannot be empty and totalAmount is required.";

/// Confirmation message returned after an order is stored.
pub const ORDER_PLACED_MESSAGE: &str = "Order placed successfully!";

/// Product categories that earn the pairing discount by default.
pub const DEFAULT_PAIR_CATEGORIES: &[&str] = &["orange", "pink", "green"];
