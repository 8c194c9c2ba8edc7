//! Shared application state.
//!
//! One `AppState` is built at startup and cloned into every handler. All
//! members are handles (`Arc`s or the sqlx pool), so cloning is cheap.

use std::sync::Arc;

use storefront_core::{LockoutRule, PricingEngine};
use storefront_db::{Database, OrderStore, ProductCatalog};

use crate::config::ServerConfig;
use crate::services::{
    AvailabilityPolicy, AvailabilityService, CatalogService, OrderService, PricingService,
    RecentOrderLockout,
};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub catalog: CatalogService,
    pub pricing: PricingService,
    pub orders: OrderService,
    pub availability: AvailabilityService,
}

impl AppState {
    /// Wires the SQLite repositories into the services.
    pub fn new(db: Database, config: &ServerConfig) -> Self {
        Self::with_lockout(db, config.lockout.clone())
    }

    /// Same as [`AppState::new`] with an explicit lockout rule.
    pub fn with_lockout(db: Database, lockout: Option<LockoutRule>) -> Self {
        let products: Arc<dyn ProductCatalog> = Arc::new(db.products());
        let order_store: Arc<dyn OrderStore> = Arc::new(db.orders());

        let catalog = CatalogService::new(products);
        let pricing = PricingService::new(catalog.clone(), Arc::new(PricingEngine::default()));
        let orders = OrderService::new(order_store.clone());

        let policies: Vec<Arc<dyn AvailabilityPolicy>> = lockout
            .into_iter()
            .map(|rule| {
                Arc::new(RecentOrderLockout::new(rule, order_store.clone()))
                    as Arc<dyn AvailabilityPolicy>
            })
            .collect();

        AppState {
            db,
            catalog,
            pricing,
            orders,
            availability: AvailabilityService::new(policies),
        }
    }
}
