use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, warn};

use crate::db::is_unique_violation;
use crate::error::ApiError;
use crate::products::models::{Product, ProductInput};
use crate::products::service::DUPLICATE_PRODUCT_MESSAGE;

/// Persistence port for products
///
/// Writes run inside their own transaction. Reads do not.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ApiError>;
    async fn find_by_name_and_brand(
        &self,
        name: &str,
        brand: &str,
    ) -> Result<Option<Product>, ApiError>;
    async fn exists(&self, id: i32) -> Result<bool, ApiError>;
    async fn save(&self, product: &ProductInput) -> Result<Product, ApiError>;
    /// Overwrites every mutable field. `None` when the id is gone.
    async fn update(&self, id: i32, product: &ProductInput) -> Result<Option<Product>, ApiError>;
    /// `false` when there was nothing to delete
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

/// PostgreSQL-backed product store
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Logs a failed write and maps constraint violations to a conflict.
/// The open transaction is rolled back when it is dropped.
fn write_error(operation: &str, err: sqlx::Error) -> ApiError {
    if is_unique_violation(&err) {
        warn!("Product {} rejected by unique (name, brand) constraint", operation);
        return ApiError::Conflict(DUPLICATE_PRODUCT_MESSAGE.to_string());
    }
    error!("Product {} failed, rolling back: {}", operation, err);
    ApiError::Database(err)
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, brand, price, created_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to list products: {}", e);
            ApiError::Database(e)
        })?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, brand, price, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_by_name_and_brand(
        &self,
        name: &str,
        brand: &str,
    ) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, brand, price, created_at
            FROM products
            WHERE name = $1 AND brand = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .bind(brand)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn exists(&self, id: i32) -> Result<bool, ApiError> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.unwrap_or(false))
    }

    async fn save(&self, product: &ProductInput) -> Result<Product, ApiError> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, brand, price)
            VALUES ($1, $2, $3)
            RETURNING id, name, brand, price, created_at
            "#,
        )
        .bind(&product.name)
        .bind(&product.brand)
        .bind(product.price)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error("insert", e))?;

        tx.commit().await.map_err(|e| write_error("insert commit", e))?;
        Ok(saved)
    }

    async fn update(&self, id: i32, product: &ProductInput) -> Result<Option<Product>, ApiError> {
        let mut tx = self.pool.begin().await?;

        // Lock the row so the full replace cannot interleave with a delete
        let existing: Option<i32> =
            sqlx::query_scalar("SELECT id FROM products WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| write_error("update lookup", e))?;

        if existing.is_none() {
            return Ok(None);
        }

        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $1,
                brand = $2,
                price = $3
            WHERE id = $4
            RETURNING id, name, brand, price, created_at
            "#,
        )
        .bind(&product.name)
        .bind(&product.brand)
        .bind(product.price)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error("update", e))?;

        tx.commit().await.map_err(|e| write_error("update commit", e))?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error("delete", e))?;

        tx.commit().await.map_err(|e| write_error("delete commit", e))?;
        Ok(result.rows_affected() > 0)
    }
}
