// Error handling module for the catalog API
// One error type for every store, service and handler result

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, warn};

/// Generic message sent to clients for storage and unexpected failures
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor.";

/// Fixed login failure message. Unknown email and wrong password look the same.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Usuario no encontrado";

/// Coarse classification of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Unauthorized,
    Storage,
    Unexpected,
}

impl ErrorKind {
    /// Machine-readable code used in error responses
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Storage => "DATABASE_ERROR",
            ErrorKind::Unexpected => "INTERNAL_ERROR",
        }
    }
}

/// Main error type for the API
///
/// Client-facing variants carry the message shown to the caller. Storage and
/// internal variants carry detail that is only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad input shape or value
    #[error("validation failed: {0}")]
    Validation(String),

    /// Missing record
    #[error("not found: {0}")]
    NotFound(String),

    /// Duplicate product (name, brand) or email
    #[error("conflict: {0}")]
    Conflict(String),

    /// Login attempt with no matching email and password digest
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed or expired bearer token
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Query, transaction or commit failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Anything else, e.g. token signing failures
    #[error("internal error: {0}")]
    Internal(String),
}

/// Consistent error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. "VALIDATION_ERROR", "NOT_FOUND")
    pub error_code: String,

    /// Human-readable error message
    pub message: String,

    /// RFC 3339 timestamp of when the error occurred
    pub timestamp: String,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::Conflict(_) => ErrorKind::Conflict,
            ApiError::InvalidCredentials | ApiError::Unauthorized(_) => ErrorKind::Unauthorized,
            ApiError::Database(_) => ErrorKind::Storage,
            ApiError::Internal(_) => ErrorKind::Unexpected,
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// Conflicts answer 400 like validation failures, matching the public
    /// contract of the registration and product endpoints.
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Storage | ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to send to clients (no internal detail)
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Validation(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unauthorized(msg) => msg.clone(),
            ApiError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            ApiError::Database(_) | ApiError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::Validation(msg) => debug!("Validation error: {}", msg),
            ApiError::NotFound(msg) => debug!("Resource not found: {}", msg),
            ApiError::Conflict(msg) => warn!("Conflict error: {}", msg),
            ApiError::InvalidCredentials => warn!("Rejected login attempt"),
            ApiError::Unauthorized(msg) => warn!("Unauthorized access attempt: {}", msg),
            ApiError::Database(db_error) => error!("Database error: {:?}", db_error),
            ApiError::Internal(msg) => error!("Internal error: {}", msg),
        }

        (
            self.status_code(),
            ErrorResponse {
                error_code: self.kind().code().to_string(),
                message: self.client_message(),
                timestamp: Utc::now().to_rfc3339(),
            },
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        (status, Json(error_response)).into_response()
    }
}

/// Convert validator errors to ApiError, keeping the first field message
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(crate::validation::first_error_message(&errors))
    }
}

/// Malformed, mistyped or incomplete JSON bodies are validation failures
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Convert a single custom check failure to ApiError
impl From<validator::ValidationError> for ApiError {
    fn from(error: validator::ValidationError) -> Self {
        let message = match error.message {
            Some(message) => message.into_owned(),
            None => error.code.into_owned(),
        };
        ApiError::Validation(message)
    }
}
