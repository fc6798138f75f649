// Database store for user accounts

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, warn};

use crate::auth::models::{NewUser, User};
use crate::auth::service::EMAIL_IN_USE_MESSAGE;
use crate::db::is_unique_violation;
use crate::error::ApiError;

/// Persistence port for users
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn email_exists(&self, email: &str) -> Result<bool, ApiError>;
    async fn save(&self, user: &NewUser) -> Result<User, ApiError>;
    /// The lookup itself is the credential check: both columns must match
    async fn find_by_email_and_digest(
        &self,
        email: &str,
        password_digest: &str,
    ) -> Result<Option<User>, ApiError>;
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn write_error(operation: &str, err: sqlx::Error) -> ApiError {
    if is_unique_violation(&err) {
        warn!("User {} rejected by unique email constraint", operation);
        return ApiError::Conflict(EMAIL_IN_USE_MESSAGE.to_string());
    }
    error!("User {} failed, rolling back: {}", operation, err);
    ApiError::Database(err)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn email_exists(&self, email: &str) -> Result<bool, ApiError> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.unwrap_or(false))
    }

    async fn save(&self, user: &NewUser) -> Result<User, ApiError> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_digest)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_digest, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_digest)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error("insert", e))?;

        tx.commit().await.map_err(|e| write_error("insert commit", e))?;
        Ok(saved)
    }

    async fn find_by_email_and_digest(
        &self,
        email: &str,
        password_digest: &str,
    ) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_digest, created_at
            FROM users
            WHERE email = $1 AND password_digest = $2
            "#,
        )
        .bind(email)
        .bind(password_digest)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
