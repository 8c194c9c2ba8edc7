//! In-memory stores for service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use storefront_core::{DocumentId, Order, Product};
use storefront_db::{DbError, DbResult, OrderStore, ProductCatalog};

#[derive(Default)]
pub struct FakeCatalog {
    pub products: Vec<Product>,
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl FakeCatalog {
    pub fn with(products: Vec<Product>) -> Self {
        FakeCatalog {
            products,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        FakeCatalog {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductCatalog for FakeCatalog {
    async fn find_by_ids(&self, ids: &[DocumentId]) -> DbResult<Vec<Product>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DbError::ConnectionFailed("store offline".to_string()));
        }
        Ok(self
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> DbResult<Vec<Product>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DbError::ConnectionFailed("store offline".to_string()));
        }
        Ok(self.products.clone())
    }
}

#[derive(Default)]
pub struct FakeOrders {
    pub orders: Mutex<Vec<Order>>,
    pub fail: bool,
}

impl FakeOrders {
    pub fn failing() -> Self {
        FakeOrders {
            fail: true,
            ..Default::default()
        }
    }

    pub fn stored(&self) -> Vec<Order> {
        self.orders.lock().map(|o| o.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl OrderStore for FakeOrders {
    async fn insert(&self, order: &Order) -> DbResult<()> {
        if self.fail {
            return Err(DbError::TransactionFailed("disk full".to_string()));
        }
        self.orders
            .lock()
            .map_err(|e| DbError::Internal(e.to_string()))?
            .push(order.clone());
        Ok(())
    }

    async fn has_order_for_product_since(
        &self,
        product_id: &DocumentId,
        since: DateTime<Utc>,
    ) -> DbResult<bool> {
        if self.fail {
            return Err(DbError::PoolExhausted);
        }
        let orders = self
            .orders
            .lock()
            .map_err(|e| DbError::Internal(e.to_string()))?;
        Ok(orders.iter().any(|order| {
            order.created_at >= since
                && order
                    .cart
                    .iter()
                    .any(|line| line.product_id.eq_ignore_ascii_case(product_id.as_str()))
        }))
    }
}
