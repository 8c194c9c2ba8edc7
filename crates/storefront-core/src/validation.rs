//! # Validation Module
//!
//! Request and catalog validation for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (serde)                                       │
//! │  ├── JSON shape, non-negative integer quantities                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Cart must not be empty                                            │
//! │  ├── Product ids must be 24 hex digits                                 │
//! │  └── Orders need a positive totalAmount                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{parse_product_ids, validate_cart_not_empty};
//! use storefront_core::CartLine;
//!
//! let cart = vec![CartLine::new("67cfc3218e6716214620f936", 1)];
//! validate_cart_not_empty(&cart).unwrap();
//! assert_eq!(parse_product_ids(&cart).unwrap().len(), 1);
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::id::DocumentId;
use crate::money::Money;
use crate::types::{CartLine, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

// =============================================================================
// Cart Validators
// =============================================================================

/// Rejects a cart with no lines.
pub fn validate_cart_not_empty(cart: &[CartLine]) -> CoreResult<()> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    Ok(())
}

/// Parses every product id in the cart.
///
/// ## Returns
/// The distinct ids in first-seen order. Fails on the first malformed id,
/// naming it exactly as the client sent it.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::parse_product_ids;
/// use storefront_core::{CartLine, CoreError};
///
/// let cart = vec![CartLine::new("oops", 1)];
/// assert_eq!(
///     parse_product_ids(&cart),
///     Err(CoreError::InvalidIdentifier("oops".to_string()))
/// );
/// ```
pub fn parse_product_ids(cart: &[CartLine]) -> CoreResult<Vec<DocumentId>> {
    let mut seen = HashSet::with_capacity(cart.len());
    let mut ids = Vec::with_capacity(cart.len());

    for line in cart {
        let id = DocumentId::parse(&line.product_id)?;
        if seen.insert(id.clone()) {
            ids.push(id);
        }
    }

    Ok(ids)
}

// =============================================================================
// Order Validators
// =============================================================================

/// Checks an order request and returns the accepted amount.
///
/// ## Rules
/// - Cart must have at least one line
/// - `totalAmount` must be present and greater than zero
///
/// Every failure is the same `InvalidOrder` error.
pub fn validate_order(cart: &[CartLine], total_amount: Option<Money>) -> CoreResult<Money> {
    if cart.is_empty() {
        return Err(CoreError::InvalidOrder);
    }

    match total_amount {
        Some(amount) if amount.is_positive() => Ok(amount),
        _ => Err(CoreError::InvalidOrder),
    }
}

/// Trims a member number; blank values become `None`.
pub fn normalize_member_number(member_number: Option<&str>) -> Option<String> {
    member_number
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product price (zero is allowed).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a product before it enters the catalog.
pub fn validate_product(product: &Product) -> CoreResult<()> {
    validate_product_name(&product.name)?;
    if validate_price(product.price).is_err() {
        return Err(CoreError::InvalidPrice {
            product_id: product.id.to_string(),
            price: product.price.amount().to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ID_A: &str = "67cfc3218e6716214620f930";
    const ID_B: &str = "67cfc3218e6716214620f931";

    #[test]
    fn test_empty_cart_rejected() {
        assert_eq!(validate_cart_not_empty(&[]), Err(CoreError::EmptyCart));
        assert!(validate_cart_not_empty(&[CartLine::new(ID_A, 0)]).is_ok());
    }

    #[test]
    fn test_parse_product_ids_dedupes() {
        let cart = vec![
            CartLine::new(ID_A, 1),
            CartLine::new(ID_B, 2),
            CartLine::new(ID_A.to_uppercase(), 3),
        ];
        let ids = parse_product_ids(&cart).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].as_str(), ID_A);
        assert_eq!(ids[1].as_str(), ID_B);
    }

    #[test]
    fn test_parse_product_ids_reports_bad_value() {
        let cart = vec![CartLine::new(ID_A, 1), CartLine::new("xyz", 1)];
        assert_eq!(
            parse_product_ids(&cart),
            Err(CoreError::InvalidIdentifier("xyz".to_string()))
        );
    }

    #[test]
    fn test_validate_order() {
        let cart = vec![CartLine::new(ID_A, 1)];

        assert_eq!(
            validate_order(&cart, Some(Money::from_units(480))),
            Ok(Money::from_units(480))
        );
        assert_eq!(validate_order(&cart, None), Err(CoreError::InvalidOrder));
        assert_eq!(validate_order(&cart, Some(Money::zero())), Err(CoreError::InvalidOrder));
        assert_eq!(
            validate_order(&cart, Some(Money::from_units(-1))),
            Err(CoreError::InvalidOrder)
        );
        assert_eq!(
            validate_order(&[], Some(Money::from_units(10))),
            Err(CoreError::InvalidOrder)
        );
    }

    #[test]
    fn test_normalize_member_number() {
        assert_eq!(normalize_member_number(Some("  M-1 ")), Some("M-1".to_string()));
        assert_eq!(normalize_member_number(Some("   ")), None);
        assert_eq!(normalize_member_number(None), None);
    }

    #[test]
    fn test_validate_product() {
        let id = DocumentId::parse(ID_A).unwrap();

        assert!(validate_product(&Product::new(id.clone(), "Orange Set", Money::zero())).is_ok());
        assert!(matches!(
            validate_product(&Product::new(id.clone(), "  ", Money::from_units(1))),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert!(matches!(
            validate_product(&Product::new(id, "Orange Set", Money::from_units(-1))),
            Err(CoreError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_product_name_too_long() {
        let long = "a".repeat(MAX_PRODUCT_NAME_LEN + 1);
        assert!(matches!(
            validate_product_name(&long),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }
}
