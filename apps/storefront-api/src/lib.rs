//! # Storefront API
//!
//! HTTP surface of the storefront: product listing, cart pricing and order
//! placement on top of `storefront-core` and `storefront-db`.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  routes    ─ axum handlers, request/response bodies                     │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  services  ─ catalog lookup, pricing, order placement, availability     │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  storefront-db (ProductCatalog / OrderStore) + storefront-core          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ServiceError, ServiceResult};
pub use routes::{build_app, build_router};
pub use state::AppState;
