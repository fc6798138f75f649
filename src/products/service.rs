use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::error::ApiError;
use crate::products::models::{Product, ProductInput};
use crate::products::repository::ProductStore;
use crate::validation::{
    validate_not_blank, validate_positive_price, validate_price_range, validate_price_scale,
};

pub const NAME_REQUIRED_MESSAGE: &str = "El nombre del producto es obligatorio.";
pub const BRAND_REQUIRED_MESSAGE: &str = "La marca del producto es obligatoria.";
pub const DUPLICATE_PRODUCT_MESSAGE: &str = "El producto ya existe con el mismo nombre y marca.";

fn product_not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("Producto con ID {} no encontrado.", id))
}

/// Service layer for the product catalog
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// All products ordered by id. Storage failures are returned, never
    /// turned into an empty list.
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let products = self.store.list().await?;
        debug!("Retrieved {} products", products.len());
        Ok(products)
    }

    pub async fn find_by_name_and_brand(
        &self,
        name: &str,
        brand: &str,
    ) -> Result<Option<Product>, ApiError> {
        self.store.find_by_name_and_brand(name, brand).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Product, ApiError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    /// Checks an input in a fixed order and reports the first failing rule
    ///
    /// 1. name and brand are not blank
    /// 2. name and brand are at most 100 characters
    /// 3. price is greater than zero
    /// 4. price has at most two decimals
    /// 5. price fits the stored precision
    pub fn validate(input: &ProductInput) -> Result<(), ApiError> {
        validate_not_blank(&input.name, NAME_REQUIRED_MESSAGE)?;
        validate_not_blank(&input.brand, BRAND_REQUIRED_MESSAGE)?;
        input.validate()?;
        validate_positive_price(&input.price)?;
        validate_price_scale(&input.price)?;
        validate_price_range(&input.price)?;
        Ok(())
    }

    /// Validates, rejects a duplicate (name, brand) and stores the product
    pub async fn save(&self, input: ProductInput) -> Result<Product, ApiError> {
        let input = input.normalized();
        Self::validate(&input)?;

        if self
            .find_by_name_and_brand(&input.name, &input.brand)
            .await?
            .is_some()
        {
            warn!(
                "Attempt to create duplicate product: {} / {}",
                input.name, input.brand
            );
            return Err(ApiError::Conflict(DUPLICATE_PRODUCT_MESSAGE.to_string()));
        }

        let product = self.store.save(&input).await?;
        info!("Successfully created product with id: {}", product.id);
        Ok(product)
    }

    /// Full replace of name, brand and price
    pub async fn update(&self, id: i32, input: ProductInput) -> Result<Product, ApiError> {
        let input = input.normalized();
        Self::validate(&input)?;

        if !self.store.exists(id).await? {
            debug!("Product with id {} not found for update", id);
            return Err(product_not_found(id));
        }

        if let Some(other) = self
            .find_by_name_and_brand(&input.name, &input.brand)
            .await?
        {
            if other.id != id {
                warn!(
                    "Attempt to update product {} to duplicate pair: {} / {}",
                    id, input.name, input.brand
                );
                return Err(ApiError::Conflict(DUPLICATE_PRODUCT_MESSAGE.to_string()));
            }
        }

        // The row can vanish between the existence check and the write
        let product = self
            .store
            .update(id, &input)
            .await?
            .ok_or_else(|| product_not_found(id))?;

        info!("Successfully updated product with id: {}", id);
        Ok(product)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        if !self.store.exists(id).await? {
            debug!("Product with id {} not found for deletion", id);
            return Err(product_not_found(id));
        }

        if !self.store.delete(id).await? {
            return Err(product_not_found(id));
        }

        info!("Successfully deleted product with id: {}", id);
        Ok(())
    }
}
