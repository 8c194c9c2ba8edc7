//! # Availability Policies
//!
//! Annotates listed products with `itemLimit`.
//!
//! ```text
//! products ──► for each product:
//!                 first policy returning Some(limit) wins
//!                 none applies → no itemLimit field
//! ```
//!
//! The shipped policy is [`RecentOrderLockout`]: one unit at most, and none
//! while the product has been ordered within the rule's window.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use storefront_core::{LockoutRule, Product};
use storefront_db::{DbResult, OrderStore};

use crate::error::ServiceResult;

/// Decides the purchase limit of a product.
#[async_trait]
pub trait AvailabilityPolicy: Send + Sync {
    /// Returns `None` if this policy doesn't govern `product`.
    async fn item_limit(&self, product: &Product, now: DateTime<Utc>) -> DbResult<Option<u32>>;
}

/// Caps a product at one unit, or zero while it was ordered recently.
pub struct RecentOrderLockout {
    rule: LockoutRule,
    orders: Arc<dyn OrderStore>,
}

impl RecentOrderLockout {
    pub fn new(rule: LockoutRule, orders: Arc<dyn OrderStore>) -> Self {
        RecentOrderLockout { rule, orders }
    }
}

#[async_trait]
impl AvailabilityPolicy for RecentOrderLockout {
    async fn item_limit(&self, product: &Product, now: DateTime<Utc>) -> DbResult<Option<u32>> {
        if !self.rule.applies_to(&product.id) {
            return Ok(None);
        }

        let since = self.rule.window_start(now);
        let recent = self
            .orders
            .has_order_for_product_since(&self.rule.product_id, since)
            .await?;

        let limit = self.rule.limit(recent);
        debug!(product_id = %product.id, recent, limit, "Lockout evaluated");
        Ok(Some(limit))
    }
}

/// Runs every configured policy over a product listing.
#[derive(Clone, Default)]
pub struct AvailabilityService {
    policies: Vec<Arc<dyn AvailabilityPolicy>>,
}

impl AvailabilityService {
    pub fn new(policies: Vec<Arc<dyn AvailabilityPolicy>>) -> Self {
        AvailabilityService { policies }
    }

    /// Sets `item_limit` on every product some policy governs.
    pub async fn annotate(
        &self,
        mut products: Vec<Product>,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<Product>> {
        for product in &mut products {
            for policy in &self.policies {
                if let Some(limit) = policy.item_limit(product, now).await? {
                    product.item_limit = Some(limit);
                    break;
                }
            }
        }
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::FakeOrders;
    use chrono::Duration;
    use storefront_core::{CartLine, DocumentId, Money, Order};

    const RED: &str = "67cfc3218e6716214620f936";
    const BLUE: &str = "67cfc3218e6716214620f938";

    fn product(raw: &str, name: &str) -> Product {
        Product::new(DocumentId::parse(raw).unwrap(), name, Money::from_units(50))
    }

    fn service(store: Arc<FakeOrders>) -> AvailabilityService {
        let rule = LockoutRule::new(DocumentId::parse(RED).unwrap(), Duration::minutes(60));
        let lockout: Arc<dyn AvailabilityPolicy> = Arc::new(RecentOrderLockout::new(rule, store));
        AvailabilityService::new(vec![lockout])
    }

    async fn order_red_at(store: &FakeOrders, at: DateTime<Utc>) {
        let order = Order::pending(vec![CartLine::new(RED, 1)], Money::from_units(50), None, at);
        store.insert(&order).await.unwrap();
    }

    #[tokio::test]
    async fn test_no_recent_order_limit_one() {
        let service = service(Arc::new(FakeOrders::default()));
        let listed = service
            .annotate(vec![product(BLUE, "Blue Set"), product(RED, "Red Set")], Utc::now())
            .await
            .unwrap();

        assert_eq!(listed[0].item_limit, None);
        assert_eq!(listed[1].item_limit, Some(1));
    }

    #[tokio::test]
    async fn test_recent_order_limit_zero() {
        let store = Arc::new(FakeOrders::default());
        let now = Utc::now();
        order_red_at(&store, now - Duration::minutes(10)).await;

        let listed = service(store)
            .annotate(vec![product(RED, "Red Set")], now)
            .await
            .unwrap();
        assert_eq!(listed[0].item_limit, Some(0));
    }

    #[tokio::test]
    async fn test_old_order_does_not_lock() {
        let store = Arc::new(FakeOrders::default());
        let now = Utc::now();
        order_red_at(&store, now - Duration::minutes(90)).await;

        let listed = service(store)
            .annotate(vec![product(RED, "Red Set")], now)
            .await
            .unwrap();
        assert_eq!(listed[0].item_limit, Some(1));
    }

    #[tokio::test]
    async fn test_no_policies_leaves_products_untouched() {
        let listed = AvailabilityService::default()
            .annotate(vec![product(RED, "Red Set")], Utc::now())
            .await
            .unwrap();
        assert_eq!(listed[0].item_limit, None);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let result = service(Arc::new(FakeOrders::failing()))
            .annotate(vec![product(RED, "Red Set")], Utc::now())
            .await;
        assert!(result.is_err());
    }
}
