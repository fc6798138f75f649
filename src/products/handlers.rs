// HTTP handlers for product endpoints
// Every route requires a bearer token

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::extract::AppJson;
use crate::models::MessageResponse;
use crate::products::models::{Product, ProductInput};
use crate::AppState;

/// GET /api/Producto
#[utoipa::path(
    get,
    path = "/api/Producto",
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No products stored")
    ),
    security(("bearer_auth" = [])),
    tag = "productos"
)]
pub async fn list_products(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Product>>, ApiError> {
    tracing::debug!("User {} listing products", user.user_id);

    let products = state.products.list().await?;
    if products.is_empty() {
        return Err(ApiError::NotFound("No se encontraron productos.".to_string()));
    }

    Ok(Json(products))
}

/// GET /api/Producto/{id}
#[utoipa::path(
    get,
    path = "/api/Producto/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "productos"
)]
pub async fn get_product(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.find_by_id(id).await?;
    Ok(Json(product))
}

/// POST /api/Producto
#[utoipa::path(
    post,
    path = "/api/Producto",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid input or duplicate name and brand"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "productos"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    tracing::debug!("User {} creating product: {}", user.user_id, payload.name);

    let product = state.products.save(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /api/Producto/{id}
/// Replaces name, brand and price
#[utoipa::path(
    patch,
    path = "/api/Producto/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid input or duplicate name and brand"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "productos"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    tracing::debug!("User {} updating product {}", user.user_id, id);

    let product = state.products.update(id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/Producto/{id}
#[utoipa::path(
    delete,
    path = "/api/Producto/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "productos"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::debug!("User {} deleting product {}", user.user_id, id);

    state.products.delete(id).await?;
    Ok(Json(MessageResponse::new("Producto eliminado exitosamente.")))
}
