//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Batch lookup by id (cart pricing)
//! - Full listing (shop page)
//! - Inserts (seeding)
//!
//! Prices live in a TEXT column and are parsed back into exact decimals.
//! A row that no longer parses is reported as `DbError::CorruptRecord`
//! instead of being silently dropped.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use storefront_core::{DocumentId, Money, Product};

use super::ProductCatalog;
use crate::error::{DbError, DbResult};

const PRODUCT_COLUMNS: &str = "id, name, price, description, image_url, category";

/// Raw `products` row.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: String,
    description: String,
    image_url: String,
    category: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id = DocumentId::parse(&row.id).map_err(|e| DbError::corrupt("Product", &row.id, e))?;
        let price: Money = row
            .price
            .parse()
            .map_err(|e| DbError::corrupt("Product", &row.id, e))?;

        Ok(Product {
            id,
            name: row.name,
            price,
            description: row.description,
            image_url: row.image_url,
            category: row.category,
            item_limit: None,
        })
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let all = repo.list_all().await?;
/// let some = repo.find_by_ids(&[id_a, id_b]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` if the id is already taken.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, description, image_url, category, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(product.id.as_str())
        .bind(&product.name)
        .bind(product.price.amount().to_string())
        .bind(&product.description)
        .bind(&product.image_url)
        .bind(&product.category)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => {
                DbError::duplicate(field, product.id.as_str())
            }
            other => other,
        })?;

        Ok(())
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &DocumentId) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ProductCatalog for ProductRepository {
    async fn find_by_ids(&self, ids: &[DocumentId]) -> DbResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!(count = ids.len(), "Looking up products by id");

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id IN ("
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.as_str());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?;

        debug!(found = rows.len(), "Product lookup finished");

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn list_all(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed products");

        rows.into_iter().map(Product::try_from).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    const ORANGE: &str = "67cfc3218e6716214620f930";
    const PINK: &str = "67cfc3218e6716214620f931";
    const MISSING: &str = "67cfc3218e6716214620f9ff";

    fn id(raw: &str) -> DocumentId {
        DocumentId::parse(raw).unwrap()
    }

    async fn seeded() -> (Database, ProductRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&Product::new(id(ORANGE), "Orange Set", Money::from_cents(1999)))
            .await
            .unwrap();
        repo.insert(
            &Product::new(id(PINK), "Pink Set", Money::from_units(40)).with_category("pink"),
        )
        .await
        .unwrap();

        (db, repo)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let (_db, repo) = seeded().await;

        let product = repo.get_by_id(&id(ORANGE)).await.unwrap().unwrap();
        assert_eq!(product.name, "Orange Set");
        assert_eq!(product.price, Money::from_cents(1999));
        assert_eq!(product.item_limit, None);

        assert!(repo.get_by_id(&id(MISSING)).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let (_db, repo) = seeded().await;

        let err = repo
            .insert(&Product::new(id(ORANGE), "Again", Money::from_units(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_find_by_ids_drops_unknown() {
        let (_db, repo) = seeded().await;

        let found = repo.find_by_ids(&[id(PINK), id(MISSING)]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category.as_deref(), Some("pink"));

        assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_in_insert_order() {
        let (_db, repo) = seeded().await;

        let names: Vec<_> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Orange Set", "Pink Set"]);
    }

    #[tokio::test]
    async fn test_corrupt_price_reported() {
        let (db, repo) = seeded().await;

        sqlx::query("UPDATE products SET price = 'lots' WHERE id = ?1")
            .bind(ORANGE)
            .execute(db.pool())
            .await
            .unwrap();

        let err = repo.find_by_ids(&[id(ORANGE)]).await.unwrap_err();
        assert!(matches!(err, DbError::CorruptRecord { .. }));
    }
}
