//! # Order Repository
//!
//! Database operations for orders.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders                           order_lines                           │
//! │  ──────────────────────           ─────────────────────────────         │
//! │  id            (PK)      ◄─────── order_id   (FK, cascade)             │
//! │  total_amount  TEXT               line_no    (cart position)            │
//! │  member_number NULL?              product_id (as submitted)             │
//! │  status        'pending'          quantity                              │
//! │  created_at    RFC 3339                                                 │
//! │                                                                         │
//! │  Both tables are written in ONE transaction.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders are append-only: there is no update or delete.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use storefront_core::{CartLine, DocumentId, Money, Order, OrderStatus};

use super::OrderStore;
use crate::error::{DbError, DbResult};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    total_amount: String,
    member_number: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    product_id: String,
    quantity: i64,
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order with its cart lines.
    ///
    /// ## Returns
    /// * `Ok(Some(Order))` - Order found
    /// * `Ok(None)` - Order not found
    pub async fn get_by_id(&self, id: &DocumentId) -> DbResult<Option<Order>> {
        let Some(row) = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, total_amount, member_number, status, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, OrderLineRow>(
            r#"
            SELECT product_id, quantity
            FROM order_lines
            WHERE order_id = ?1
            ORDER BY line_no
            "#,
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await?;

        decode_order(row, lines).map(Some)
    }

    /// Counts all orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    /// Inserts the order row and one row per cart line.
    ///
    /// Either everything is written or nothing is.
    async fn insert(&self, order: &Order) -> DbResult<()> {
        debug!(id = %order.id, lines = order.cart.len(), "Inserting order");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, total_amount, member_number, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(order.id.as_str())
        .bind(order.total_amount.amount().to_string())
        .bind(&order.member_number)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        for (line_no, line) in order.cart.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_lines (order_id, line_no, product_id, quantity)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(order.id.as_str())
            .bind(line_no as i64)
            .bind(&line.product_id)
            .bind(i64::from(line.quantity))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(id = %order.id, total = %order.total_amount, "Order stored");
        Ok(())
    }

    async fn has_order_for_product_since(
        &self,
        product_id: &DocumentId,
        since: DateTime<Utc>,
    ) -> DbResult<bool> {
        // julianday() compares instants, so differing offsets or
        // fraction-digit counts in the stored text don't matter
        let hits: i64 = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM orders o
                INNER JOIN order_lines ol ON ol.order_id = o.id
                WHERE lower(ol.product_id) = ?1
                AND julianday(o.created_at) >= julianday(?2)
            )
            "#,
        )
        .bind(product_id.as_str())
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        let found = hits != 0;
        debug!(product_id = %product_id, since = %since, found, "Checked recent orders");
        Ok(found)
    }
}

fn decode_order(row: OrderRow, lines: Vec<OrderLineRow>) -> DbResult<Order> {
    let id = DocumentId::parse(&row.id).map_err(|e| DbError::corrupt("Order", &row.id, e))?;
    let total_amount: Money = row
        .total_amount
        .parse()
        .map_err(|e| DbError::corrupt("Order", &row.id, e))?;
    let status = OrderStatus::parse(&row.status)
        .ok_or_else(|| DbError::corrupt("Order", &row.id, format!("unknown status {}", row.status)))?;

    let cart = lines
        .into_iter()
        .map(|line| -> DbResult<CartLine> {
            let quantity = u32::try_from(line.quantity)
                .map_err(|e| DbError::corrupt("Order", &row.id, e))?;
            Ok(CartLine::new(line.product_id, quantity))
        })
        .collect::<DbResult<Vec<_>>>()?;

    Ok(Order {
        id,
        cart,
        total_amount,
        member_number: row.member_number,
        status,
        created_at: row.created_at,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
