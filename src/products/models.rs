use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Product row as stored in the `products` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Producto1")]
    pub name: String,
    #[schema(example = "Marca1")]
    pub brand: String,
    /// Serialized as a decimal string to keep the exact cents
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating or fully replacing a product
///
/// Blank checks and price rules run in `ProductService::validate`; the
/// derive only covers the length limits.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(length(max = 100, message = "El número máximo de caracteres es de 100!"))]
    #[schema(example = "Producto1")]
    pub name: String,
    #[validate(length(max = 100, message = "El número máximo de caracteres es de 100!"))]
    #[schema(example = "Marca1")]
    pub brand: String,
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
}

impl ProductInput {
    /// Trims surrounding whitespace from the text fields
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            brand: self.brand.trim().to_string(),
            price: self.price,
        }
    }
}
