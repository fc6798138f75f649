use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::products::models::{Product, ProductInput};
use crate::products::repository::ProductStore;
use crate::products::service::DUPLICATE_PRODUCT_MESSAGE;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Product>,
    last_id: i32,
}

impl Table {
    fn holds_pair(&self, product: &ProductInput, except: Option<i32>) -> bool {
        self.rows.values().any(|row| {
            Some(row.id) != except && row.name == product.name && row.brand == product.brand
        })
    }
}

/// Product store kept in memory, with the same (name, brand) uniqueness as the table
#[derive(Default, Clone)]
pub struct InMemoryProductStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ApiError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_by_name_and_brand(
        &self,
        name: &str,
        brand: &str,
    ) -> Result<Option<Product>, ApiError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|row| row.name == name && row.brand == brand)
            .cloned())
    }

    async fn exists(&self, id: i32) -> Result<bool, ApiError> {
        let table = self.table.read().await;
        Ok(table.rows.contains_key(&id))
    }

    async fn save(&self, product: &ProductInput) -> Result<Product, ApiError> {
        let mut table = self.table.write().await;
        if table.holds_pair(product, None) {
            return Err(ApiError::Conflict(DUPLICATE_PRODUCT_MESSAGE.to_string()));
        }

        table.last_id += 1;
        let saved = Product {
            id: table.last_id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price,
            created_at: Utc::now(),
        };
        table.rows.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, id: i32, product: &ProductInput) -> Result<Option<Product>, ApiError> {
        let mut table = self.table.write().await;
        if table.holds_pair(product, Some(id)) {
            return Err(ApiError::Conflict(DUPLICATE_PRODUCT_MESSAGE.to_string()));
        }

        Ok(table.rows.get_mut(&id).map(|row| {
            row.name = product.name.clone();
            row.brand = product.brand.clone();
            row.price = product.price;
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}

/// Store whose every call fails like an unreachable database
#[derive(Default, Clone)]
pub struct FailingProductStore;

fn unavailable() -> ApiError {
    ApiError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ProductStore for FailingProductStore {
    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Product>, ApiError> {
        Err(unavailable())
    }

    async fn find_by_name_and_brand(
        &self,
        _name: &str,
        _brand: &str,
    ) -> Result<Option<Product>, ApiError> {
        Err(unavailable())
    }

    async fn exists(&self, _id: i32) -> Result<bool, ApiError> {
        Err(unavailable())
    }

    async fn save(&self, _product: &ProductInput) -> Result<Product, ApiError> {
        Err(unavailable())
    }

    async fn update(&self, _id: i32, _product: &ProductInput) -> Result<Option<Product>, ApiError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: i32) -> Result<bool, ApiError> {
        Err(unavailable())
    }
}
