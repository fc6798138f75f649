// User account models and request/response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User database model
/// `password_digest` is the hex SHA-256 of the credential and is never serialized
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

/// Row to insert; the id and creation time come from the database
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_digest: String,
}

/// Registration request DTO
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(max = 100, message = "El número máximo de caracteres es de 100!"))]
    #[schema(example = "Jaime")]
    pub name: String,
    #[validate(
        email(message = "El correo electrónico no es válido."),
        length(max = 100, message = "El número máximo de caracteres es de 100!")
    )]
    #[schema(example = "jaime@gmail.com")]
    pub email: String,
    #[validate(length(min = 1, max = 16, message = "La clave es obligatoria y admite hasta 16 caracteres."))]
    #[schema(example = "123")]
    pub password: String,
}

/// Login request DTO
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100, message = "El Email es obligatorio y admite hasta 100 caracteres."))]
    #[schema(example = "jaime@gmail.com")]
    pub email: String,
    #[validate(length(min = 1, max = 16, message = "La clave es obligatoria y admite hasta 16 caracteres."))]
    #[schema(example = "123")]
    pub password: String,
}

/// Successful login body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login exitoso")]
    pub message: String,
    pub token: String,
}

/// Lower-cases and trims an email so lookups and uniqueness ignore case
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
