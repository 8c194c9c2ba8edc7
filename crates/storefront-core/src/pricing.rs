//! # Pricing Engine
//!
//! Computes cart totals with pairing and membership discounts.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Pricing                                       │
//! │                                                                         │
//! │  for each cart line with a resolved product:                           │
//! │    grandTotal += price × qty                                            │
//! │    if category ∈ {orange, pink, green} and ⌊qty / 2⌋ > 0:              │
//! │        discount = price × 2 × 5% × pairs                                │
//! │        emit DiscountItem                                                │
//! │                                                                         │
//! │  memberDiscount = 10% × (grandTotal − Σ pair discounts)   if member    │
//! │  totalDiscount  = Σ pair discounts + memberDiscount                    │
//! │  finalTotal     = grandTotal − totalDiscount                           │
//! │                                                                         │
//! │  Exact decimal arithmetic throughout. No rounding.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolving ids against a store is the caller's job. The engine only sees
//! the products that were found; lines pointing anywhere else are skipped.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::id::DocumentId;
use crate::money::Money;
use crate::types::{CalculationResult, CartLine, DiscountItem, Product};
use crate::DEFAULT_PAIR_CATEGORIES;

// =============================================================================
// Rules
// =============================================================================

/// Discount rates and the categories eligible for the pairing discount.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRules {
    /// Fraction of a pair's price discounted per full pair.
    pub pair_rate: Decimal,
    /// Fraction of the post-pair subtotal discounted for members.
    pub member_rate: Decimal,
    /// Lowercase category tags earning the pairing discount.
    pub pair_categories: HashSet<String>,
}

impl Default for PricingRules {
    fn default() -> Self {
        PricingRules {
            pair_rate: Decimal::new(5, 2),
            member_rate: Decimal::new(10, 2),
            pair_categories: DEFAULT_PAIR_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl PricingRules {
    /// Returns true if `category` earns the pairing discount.
    pub fn is_pair_category(&self, category: &str) -> bool {
        self.pair_categories.contains(&category.to_ascii_lowercase())
    }
}

// =============================================================================
// Categorizers
// =============================================================================

/// Resolves the discount category of a product.
///
/// Implementations return a lowercase tag, or `None` for products that do
/// not take part in any category discount.
pub trait DiscountCategorizer: Send + Sync {
    fn categorize(&self, product: &Product) -> Option<String>;
}

/// Matches the product name against a fixed keyword list.
///
/// The first keyword found as a case-insensitive substring wins.
/// `"Big ORANGE Bundle"` → `orange`.
#[derive(Debug, Clone)]
pub struct NameKeywordCategorizer {
    keywords: Vec<String>,
}

impl NameKeywordCategorizer {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NameKeywordCategorizer {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }
}

impl Default for NameKeywordCategorizer {
    fn default() -> Self {
        NameKeywordCategorizer::new(DEFAULT_PAIR_CATEGORIES.iter().copied())
    }
}

impl DiscountCategorizer for NameKeywordCategorizer {
    fn categorize(&self, product: &Product) -> Option<String> {
        let name = product.name.to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| name.contains(keyword.as_str()))
            .cloned()
    }
}

/// Uses the product's `category` tag, falling back to name keywords.
#[derive(Debug, Clone, Default)]
pub struct MetadataCategorizer {
    fallback: NameKeywordCategorizer,
}

impl MetadataCategorizer {
    pub fn with_fallback(fallback: NameKeywordCategorizer) -> Self {
        MetadataCategorizer { fallback }
    }
}

impl DiscountCategorizer for MetadataCategorizer {
    fn categorize(&self, product: &Product) -> Option<String> {
        match product.category.as_deref().map(str::trim) {
            Some(tag) if !tag.is_empty() => Some(tag.to_lowercase()),
            _ => self.fallback.categorize(product),
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Prices carts against a resolved product set.
///
/// ## Example
/// ```rust
/// use std::collections::HashMap;
/// use storefront_core::{CartLine, DocumentId, Money, PricingEngine, Product};
///
/// let id = DocumentId::parse("67cfc3218e6716214620f930").unwrap();
/// let catalog = HashMap::from([(
///     id.clone(),
///     Product::new(id.clone(), "Orange Set", Money::from_units(100)),
/// )]);
///
/// let result = PricingEngine::default().price(&[CartLine::new(id, 5)], &catalog, Some("M-1"));
/// assert_eq!(result.member_discount, Money::from_units(48));
/// assert_eq!(result.final_total, Money::from_units(432));
/// ```
pub struct PricingEngine {
    rules: PricingRules,
    categorizer: Box<dyn DiscountCategorizer>,
}

impl Default for PricingEngine {
    fn default() -> Self {
        PricingEngine::with_rules(PricingRules::default())
    }
}

impl std::fmt::Debug for PricingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingEngine")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl PricingEngine {
    pub fn new(rules: PricingRules, categorizer: Box<dyn DiscountCategorizer>) -> Self {
        PricingEngine { rules, categorizer }
    }

    /// Builds an engine whose name fallback matches `rules.pair_categories`.
    ///
    /// Category tags still take precedence over the product name.
    pub fn with_rules(rules: PricingRules) -> Self {
        let mut keywords: Vec<&String> = rules.pair_categories.iter().collect();
        keywords.sort();
        let fallback = NameKeywordCategorizer::new(keywords.into_iter().cloned());

        PricingEngine::new(rules, Box::new(MetadataCategorizer::with_fallback(fallback)))
    }

    /// Computes totals for `cart`.
    ///
    /// ## Arguments
    /// * `cart` - Lines in any order; duplicates are priced independently
    /// * `products` - Products that were found for the cart's ids
    /// * `member_number` - Any non-blank value grants the member discount
    ///
    /// ## Returns
    /// The calculation result. Never fails: lines whose id is malformed or
    /// missing from `products` contribute nothing.
    pub fn price(
        &self,
        cart: &[CartLine],
        products: &HashMap<DocumentId, Product>,
        member_number: Option<&str>,
    ) -> CalculationResult {
        let mut grand_total = Money::zero();
        let mut discount_items = Vec::new();

        for line in cart {
            let Some(product) = DocumentId::parse(&line.product_id)
                .ok()
                .and_then(|id| products.get(&id))
            else {
                continue;
            };

            grand_total += product.line_total(line.quantity);

            if let Some(item) = self.pair_discount(product, line.quantity) {
                discount_items.push(item);
            }
        }

        let pair_total: Money = discount_items.iter().map(|d| d.discount_amount).sum();

        let member_discount = if is_member(member_number) {
            (grand_total - pair_total).percentage(self.rules.member_rate)
        } else {
            Money::zero()
        };

        let total_discount = pair_total + member_discount;

        CalculationResult {
            grand_total,
            discount_items,
            member_discount,
            total_discount,
            final_total: grand_total - total_discount,
        }
    }

    fn pair_discount(&self, product: &Product, quantity: u32) -> Option<DiscountItem> {
        let category = self.categorizer.categorize(product)?;
        if !self.rules.is_pair_category(&category) {
            return None;
        }

        let pairs = quantity / 2;
        if pairs == 0 {
            return None;
        }

        let discount = product
            .price
            .multiply_quantity(2)
            .percentage(self.rules.pair_rate)
            .multiply_quantity(pairs);

        Some(DiscountItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            discount_amount: discount,
        })
    }
}

/// A member number counts only if it has non-whitespace content.
fn is_member(member_number: Option<&str>) -> bool {
    member_number.is_some_and(|m| !m.trim().is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================
