use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auth::models::{NewUser, User};
use crate::auth::repository::UserStore;
use crate::auth::service::EMAIL_IN_USE_MESSAGE;
use crate::error::ApiError;

/// User store kept in memory, keyed by email like the unique column
#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn email_exists(&self, email: &str) -> Result<bool, ApiError> {
        let users = self.users.read().await;
        Ok(users.contains_key(email))
    }

    async fn save(&self, user: &NewUser) -> Result<User, ApiError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(ApiError::Conflict(EMAIL_IN_USE_MESSAGE.to_string()));
        }

        let saved = User {
            id: users.len() as i32 + 1,
            name: user.name.clone(),
            email: user.email.clone(),
            password_digest: user.password_digest.clone(),
            created_at: Utc::now(),
        };
        users.insert(saved.email.clone(), saved.clone());
        Ok(saved)
    }

    async fn find_by_email_and_digest(
        &self,
        email: &str,
        password_digest: &str,
    ) -> Result<Option<User>, ApiError> {
        let users = self.users.read().await;
        Ok(users
            .get(email)
            .filter(|user| user.password_digest == password_digest)
            .cloned())
    }
}
