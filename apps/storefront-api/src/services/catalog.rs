//! Catalog lookup.
//!
//! Resolves cart product ids against the product store.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use storefront_core::validation::parse_product_ids;
use storefront_core::{CartLine, DocumentId, Product};
use storefront_db::ProductCatalog;

use crate::error::ServiceResult;

/// Read-only access to products for the HTTP layer.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn ProductCatalog>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        CatalogService { catalog }
    }

    /// Returns every product in catalog order.
    pub async fn list_all(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.catalog.list_all().await?)
    }

    /// Looks up the products referenced by `cart`.
    ///
    /// ## Behavior
    /// - Any malformed id fails the whole lookup before the store is queried
    /// - Duplicate ids are queried once
    /// - Ids the store doesn't know are absent from the result
    /// - No ids, no query
    pub async fn lookup(&self, cart: &[CartLine]) -> ServiceResult<HashMap<DocumentId, Product>> {
        let ids = parse_product_ids(cart)?;
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let products = self.catalog.find_by_ids(&ids).await?;
        debug!(requested = ids.len(), found = products.len(), "Catalog lookup");

        Ok(products.into_iter().map(|p| (p.id.clone(), p)).collect())
    }
}
