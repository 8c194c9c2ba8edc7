//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │    CartLine     │   │ CalculationResult   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  _id            │◄──│  productId      │   │  grandTotal         │   │
//! │  │  name           │   │  quantity       │   │  discountItems[]    │   │
//! │  │  price          │   └─────────────────┘   │  memberDiscount     │   │
//! │  │  category?      │                         │  totalDiscount      │   │
//! │  │  itemLimit?     │   ┌─────────────────┐   │  finalTotal         │   │
//! │  └─────────────────┘   │     Order       │   └─────────────────────┘   │
//! │                        │  ─────────────  │                              │
//! │                        │  cart snapshot  │   ┌─────────────────────┐   │
//! │                        │  totalAmount    │   │   OrderStatus       │   │
//! │                        │  memberNumber?  │   │   Pending           │   │
//! │                        │  status         │   └─────────────────────┘   │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names on the wire are camelCase, except the product key `_id`
//! which the browser client reads as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::DocumentId;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product offered in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Document identifier.
    #[serde(rename = "_id")]
    pub id: DocumentId,

    /// Display name. Also the legacy source of discount eligibility.
    pub name: String,

    /// Unit price (non-negative).
    pub price: Money,

    /// Optional marketing description.
    #[serde(default)]
    pub description: String,

    /// Image shown on the product card.
    #[serde(rename = "imageURL", default)]
    pub image_url: String,

    /// Discount category tag (e.g. `"orange"`), if the catalog sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Maximum units a visitor may put in the cart right now.
    ///
    /// Only present for products governed by an availability rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_limit: Option<u32>,
}

impl Product {
    /// Creates a product with only the fields pricing needs.
    pub fn new(id: DocumentId, name: impl Into<String>, price: Money) -> Self {
        Product {
            id,
            name: name.into(),
            price,
            description: String::new(),
            image_url: String::new(),
            category: None,
            item_limit: None,
        }
    }

    /// Sets the discount category tag.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns the line total for `quantity` units.
    #[inline]
    pub fn line_total(&self, quantity: u32) -> Money {
        self.price.multiply_quantity(quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// One `(product, quantity)` entry submitted for pricing.
///
/// `product_id` stays a raw string here: ids are validated by the catalog
/// lookup so the client gets `Invalid productId: <value>` instead of a
/// generic body parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
}

impl CartLine {
    /// Creates a cart line.
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        CartLine {
            product_id: product_id.into(),
            quantity,
        }
    }
}


// =============================================================================
// Calculation Result
// =============================================================================

/// A pairing discount granted on one cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountItem {
    /// Product the discount belongs to (wire key `id`).
    #[serde(rename = "id")]
    pub product_id: DocumentId,
    pub name: String,
    pub discount_amount: Money,
}

/// Totals for a priced cart.
///
/// ## Invariants
/// - `total_discount == sum(discount_items) + member_discount`
/// - `final_total == grand_total - total_discount`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Sum of `price × quantity` before any discount.
    pub grand_total: Money,
    pub discount_items: Vec<DiscountItem>,
    pub member_discount: Money,
    pub total_discount: Money,
    pub final_total: Money,
}

impl CalculationResult {
    /// Sum of all pairing discounts.
    pub fn pair_discount_total(&self) -> Money {
        self.discount_items.iter().map(|d| d.discount_amount).sum()
    }
}

// =============================================================================
// Order
// =============================================================================

/// Lifecycle status of an order.
///
/// Only `Pending` is ever written; later states are handled outside the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
}

impl OrderStatus {
    /// Storage representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
        }
    }

    /// Parses the storage representation.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(OrderStatus::Pending),
            _ => None,
        }
    }
}

/// A placed order.
///
/// Uses snapshot pattern: the cart is stored exactly as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: DocumentId,
    pub cart: Vec<CartLine>,
    /// Amount computed by the client. Not re-verified by the server.
    pub total_amount: Money,
    pub member_number: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Builds a new pending order with a fresh id.
    pub fn pending(
        cart: Vec<CartLine>,
        total_amount: Money,
        member_number: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Order {
            id: DocumentId::generate(),
            cart,
            total_amount,
            member_number,
            status: OrderStatus::Pending,
            created_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
