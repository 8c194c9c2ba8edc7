//! # Service Layer
//!
//! Orchestrates store access around the pure pricing core.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET  /product/            ──► CatalogService::list_all                 │
//! │                                 └─► AvailabilityService::annotate       │
//! │                                                                         │
//! │  POST /product/calculate   ──► PricingService::calculate                │
//! │                                 ├─► CatalogService::lookup              │
//! │                                 └─► PricingEngine::price (pure)         │
//! │                                                                         │
//! │  POST /product/place-order ──► OrderService::place                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Services hold their stores as `Arc<dyn Trait>` and are cheap to clone.

pub mod availability;
pub mod catalog;
pub mod orders;
pub mod pricing;

#[cfg(test)]
pub(crate) mod fakes;

pub use availability::{AvailabilityPolicy, AvailabilityService, RecentOrderLockout};
pub use catalog::CatalogService;
pub use orders::OrderService;
pub use pricing::PricingService;
