//! Cart pricing.
//!
//! Validates the cart, resolves its products and hands both to the pure
//! [`PricingEngine`].

use std::sync::Arc;

use tracing::debug;

use storefront_core::validation::validate_cart_not_empty;
use storefront_core::{CalculationResult, CartLine, PricingEngine};

use super::CatalogService;
use crate::error::ServiceResult;

#[derive(Clone)]
pub struct PricingService {
    catalog: CatalogService,
    engine: Arc<PricingEngine>,
}

impl PricingService {
    pub fn new(catalog: CatalogService, engine: Arc<PricingEngine>) -> Self {
        PricingService { catalog, engine }
    }

    /// Prices `cart` for an optional member.
    ///
    /// ## Errors
    /// - `EmptyCart` when the cart has no lines
    /// - `InvalidIdentifier` when any product id is malformed
    /// - Store failures, with no partial result
    pub async fn calculate(
        &self,
        cart: &[CartLine],
        member_number: Option<&str>,
    ) -> ServiceResult<CalculationResult> {
        validate_cart_not_empty(cart)?;

        let products = self.catalog.lookup(cart).await?;
        let result = self.engine.price(cart, &products, member_number);

        debug!(
            lines = cart.len(),
            grand_total = %result.grand_total,
            final_total = %result.final_total,
            "Cart priced"
        );

        Ok(result)
    }
}
