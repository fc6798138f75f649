mod auth;
mod config;
mod db;
mod error;
mod extract;
mod models;
mod products;
mod validation;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use auth::{PgUserStore, TokenService, UserService};
use config::AppConfig;
use products::{PgProductStore, ProductService};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        products::handlers::list_products,
        products::handlers::get_product,
        products::handlers::create_product,
        products::handlers::update_product,
        products::handlers::delete_product,
    ),
    components(
        schemas(
            products::models::Product,
            products::models::ProductInput,
            auth::models::RegisterRequest,
            auth::models::LoginRequest,
            auth::models::LoginResponse,
            models::MessageResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "acceso", description = "User registration and login"),
        (name = "productos", description = "Product catalog endpoints")
    ),
    info(
        title = "Catalog API",
        version = "1.0.0",
        description = "Product catalog and user accounts with JWT login"
    )
)]
struct ApiDoc;

/// Registers the bearer JWT scheme used by the product routes
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    pub users: UserService,
    pub tokens: Arc<TokenService>,
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds tracing and CORS layers
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/Acceso/Registrase", post(auth::handlers::register_handler))
        .route("/api/Acceso/Login", post(auth::handlers::login_handler))
        .route(
            "/api/Producto",
            get(products::handlers::list_products).post(products::handlers::create_product),
        )
        .route(
            "/api/Producto/:id",
            get(products::handlers::get_product)
                .patch(products::handlers::update_product)
                .delete(products::handlers::delete_product),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Catalog API - Starting...");

    let config = AppConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url, config.db_max_connections).await?;
    db::run_migrations(&pool).await?;

    let tokens = Arc::new(TokenService::new(
        config.jwt_secret.clone(),
        config.token_ttl_minutes,
    ));
    let state = AppState {
        products: ProductService::new(Arc::new(PgProductStore::new(pool.clone()))),
        users: UserService::new(Arc::new(PgUserStore::new(pool)), tokens.clone()),
        tokens,
    };

    let app = create_router(state);

    let addr = config.bind_address();
    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Catalog API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
