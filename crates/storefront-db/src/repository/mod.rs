//! # Repository Module
//!
//! Store ports and their SQLite implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ports and Adapters                                   │
//! │                                                                         │
//! │  Service layer (storefront-api)                                        │
//! │       │                                                                 │
//! │       │  Arc<dyn ProductCatalog>      Arc<dyn OrderStore>              │
//! │       ▼                                                                 │
//! │  ┌──────────────────────┐          ┌──────────────────────┐            │
//! │  │ ProductCatalog       │          │ OrderStore           │            │
//! │  │  find_by_ids         │          │  insert              │            │
//! │  │  list_all            │          │  has_order_for_      │            │
//! │  └──────────┬───────────┘          │    product_since     │            │
//! │             │                      └──────────┬───────────┘            │
//! │             ▼                                 ▼                         │
//! │  ProductRepository (SQLite)        OrderRepository (SQLite)            │
//! │                                                                         │
//! │  Tests swap in fakes; the server wires the SQLite adapters.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog reads and seeding
//! - [`OrderRepository`](order::OrderRepository) - Order writes and recency queries

pub mod order;
pub mod product;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use storefront_core::{DocumentId, Order, Product};

use crate::error::DbResult;

/// Read access to the product catalog.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Returns the products matching `ids`. Unknown ids are silently absent.
    async fn find_by_ids(&self, ids: &[DocumentId]) -> DbResult<Vec<Product>>;

    /// Returns every product in catalog order.
    async fn list_all(&self) -> DbResult<Vec<Product>>;
}

/// Write access to orders plus the recency query used by lockout rules.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists an order and its cart lines atomically.
    async fn insert(&self, order: &Order) -> DbResult<()>;

    /// Returns true if any order created at or after `since` contains
    /// `product_id`.
    async fn has_order_for_product_since(
        &self,
        product_id: &DocumentId,
        since: DateTime<Utc>,
    ) -> DbResult<bool>;
}
