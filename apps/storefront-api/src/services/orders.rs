//! Order placement.
//!
//! Stores the submitted cart as a pending order. The amount is the one the
//! client computed; it is recorded as-is and not recomputed here.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use storefront_core::validation::{normalize_member_number, validate_order};
use storefront_core::{CartLine, DocumentId, Money, Order};
use storefront_db::OrderStore;

use crate::error::ServiceResult;

#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        OrderService { store }
    }

    /// Persists a pending order and returns its id.
    ///
    /// ## Errors
    /// - `InvalidOrder` for an empty cart or a missing/non-positive amount
    /// - Store failures
    ///
    /// Each call creates a new order, even for an identical request.
    pub async fn place(
        &self,
        cart: Vec<CartLine>,
        member_number: Option<&str>,
        total_amount: Option<Money>,
    ) -> ServiceResult<DocumentId> {
        let total_amount = validate_order(&cart, total_amount)?;
        let member_number = normalize_member_number(member_number);

        let order = Order::pending(cart, total_amount, member_number, Utc::now());
        self.store.insert(&order).await?;

        info!(
            order_id = %order.id,
            lines = order.cart.len(),
            total = %order.total_amount,
            member = order.member_number.is_some(),
            "Order placed"
        );

        Ok(order.id)
    }
}
