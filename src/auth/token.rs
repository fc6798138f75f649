// JWT token generation and validation service

use crate::error::ApiError;
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind as JwtErrorKind, Algorithm, DecodingKey, EncodingKey,
    Header, Validation,
};
use serde::{Deserialize, Serialize};

pub const EXPIRED_TOKEN_MESSAGE: &str = "token expired";
pub const INVALID_TOKEN_MESSAGE: &str = "invalid token";

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // user_id
    pub email: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Token service for JWT operations
pub struct TokenService {
    secret: String,
    access_token_duration: i64, // in seconds
}

impl TokenService {
    /// Create a new TokenService with a signing secret and a lifetime in minutes
    pub fn new(secret: impl Into<String>, ttl_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            access_token_duration: ttl_minutes * 60,
        }
    }

    /// Generate an HS256 access token carrying the user id and email
    pub fn generate_access_token(&self, user_id: i32, email: &str) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp: now + self.access_token_duration,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(format!("token generation failed: {}", e)))
    }

    /// Validate an access token's signature and expiry
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            JwtErrorKind::ExpiredSignature => ApiError::Unauthorized(EXPIRED_TOKEN_MESSAGE.to_string()),
            _ => ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string()),
        })
    }
}
