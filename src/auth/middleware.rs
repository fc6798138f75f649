// Bearer token extractor for protected routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use std::sync::Arc;
use tracing::warn;

use crate::auth::token::TokenService;
use crate::error::ApiError;

pub const MISSING_TOKEN_MESSAGE: &str = "missing bearer token";

/// Authenticated user extractor for protected routes
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
}

/// Pulls the token out of an `Authorization: Bearer <token>` header
fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized(MISSING_TOKEN_MESSAGE.to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized(MISSING_TOKEN_MESSAGE.to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized(MISSING_TOKEN_MESSAGE.to_string()))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).map_err(|e| {
            warn!("Rejected request to {} without a bearer token", parts.uri.path());
            e
        })?;

        let tokens = Arc::<TokenService>::from_ref(state);
        let claims = tokens.validate_access_token(token)?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}
