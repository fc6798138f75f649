// HTTP handlers for account endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::auth::models::{LoginRequest, LoginResponse, RegisterRequest};
use crate::error::ApiError;
use crate::extract::AppJson;
use crate::models::MessageResponse;
use crate::AppState;

/// Register a new user
/// POST /api/Acceso/Registrase
#[utoipa::path(
    post,
    path = "/api/Acceso/Registrase",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Invalid input or email already in use")
    ),
    tag = "acceso"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let response = state.users.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log a user in
/// POST /api/Acceso/Login
#[utoipa::path(
    post,
    path = "/api/Acceso/Login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "No user with that email and password")
    ),
    tag = "acceso"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let response = state.users.login(request).await?;
    Ok(Json(response))
}
