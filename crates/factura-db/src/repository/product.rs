//! # Product Repository
//!
//! Database operations for saved products.
//!
//! Product prices are stored tax-inclusive, exactly as entered. The row
//! conversion re-checks that the stored price is still a valid unit
//! price so a tampered database cannot feed NaN into the pricing engine.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use factura_core::{validation, Product};

// =============================================================================
// Row Type
// =============================================================================

/// Raw product row as stored in SQLite.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    price: f64,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        validation::validate_unit_price(row.price)
            .map_err(|e| DbError::corrupt("Product", &row.id, e.to_string()))?;

        Ok(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
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
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, category, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.category)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, category, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Lists products sorted by name.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, category, created_at, updated_at
            FROM products
            ORDER BY name
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Updates an existing product, bumping `updated_at`.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price = ?4,
                category = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.category)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product by ID.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts stored products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::generate_id;

    fn test_product(name: &str, price: f64) -> Product {
        let now = Utc::now();
        Product {
            id: generate_id(),
            name: name.to_string(),
            description: String::new(),
            price,
            category: "Servicios".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_get_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let product = test_product("Diseño web", 121.0);
        repo.insert(&product).await.unwrap();

        let loaded = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Diseño web");
        assert_eq!(loaded.price, 121.0);
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&test_product("Soporte", 30.25)).await.unwrap();
        repo.insert(&test_product("Diseño", 121.0)).await.unwrap();

        let all = repo.list(10).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Diseño");
        assert_eq!(all[1].name, "Soporte");
    }

    #[tokio::test]
    async fn test_corrupt_price_is_reported() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, category, created_at, updated_at)
            VALUES ('bad-1', 'Broken', '', -5.0, '',
                    '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        assert!(matches!(
            repo.get_by_id("bad-1").await,
            Err(DbError::Corrupt { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let mut product = test_product("Hosting", 60.5);
        repo.insert(&product).await.unwrap();

        product.price = 72.6;
        repo.update(&product).await.unwrap();
        let loaded = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(loaded.price, 72.6);

        repo.delete(&product.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
