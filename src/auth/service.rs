// User accounts service - registration and login

use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::auth::{
    models::{normalize_email, LoginRequest, LoginResponse, NewUser, RegisterRequest},
    password::PasswordService,
    repository::UserStore,
    token::TokenService,
};
use crate::error::ApiError;
use crate::models::MessageResponse;
use crate::validation::validate_not_blank;

pub const USER_NAME_REQUIRED_MESSAGE: &str = "El nombre es obligatorio.";
pub const EMAIL_IN_USE_MESSAGE: &str = "Esta dirección de correo electrónico ya está en uso.";
pub const REGISTERED_MESSAGE: &str = "Usuario registrado exitosamente.";
pub const LOGIN_MESSAGE: &str = "Login exitoso";

/// Service coordinating the user store, the password digest and the token issuer
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    /// Register a new user under a normalized, unused email
    pub async fn register(&self, request: RegisterRequest) -> Result<MessageResponse, ApiError> {
        let request = RegisterRequest {
            email: normalize_email(&request.email),
            ..request
        };
        validate_not_blank(&request.name, USER_NAME_REQUIRED_MESSAGE)?;
        request.validate()?;

        let email = request.email;
        if self.store.email_exists(&email).await? {
            warn!("Registration attempt with an email already in use");
            return Err(ApiError::Conflict(EMAIL_IN_USE_MESSAGE.to_string()));
        }

        let user = self
            .store
            .save(&NewUser {
                name: request.name.trim().to_string(),
                email,
                password_digest: PasswordService::hash_password(&request.password),
            })
            .await?;

        info!("Registered user with id: {}", user.id);
        Ok(MessageResponse::new(REGISTERED_MESSAGE))
    }

    /// Log a user in and issue an access token
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            email: normalize_email(&request.email),
            ..request
        };
        request.validate()?;

        let email = request.email;
        let digest = PasswordService::hash_password(&request.password);

        let user = match self.store.find_by_email_and_digest(&email, &digest).await? {
            Some(user) => user,
            None => {
                debug!("No user matched the submitted credentials");
                return Err(ApiError::InvalidCredentials);
            }
        };

        let token = self.tokens.generate_access_token(user.id, &user.email)?;
        info!("User {} logged in", user.id);

        Ok(LoginResponse {
            message: LOGIN_MESSAGE.to_string(),
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::memory::InMemoryUserStore;
    use crate::error::{ErrorKind, INVALID_CREDENTIALS_MESSAGE};

    fn service() -> (UserService, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new("test_secret_key_for_testing_purposes", 10));
        let service = UserService::new(Arc::new(InMemoryUserStore::new()), tokens.clone());
        (service, tokens)
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Jaime".to_string(),
            email: email.to_string(),
            password: "123".to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_returns_success_message() {
        let (service, _) = service();
        let response = service
            .register(register_request("jaime@gmail.com"))
            .await
            .unwrap();
        assert_eq!(response.message, REGISTERED_MESSAGE);
    }

    #[tokio::test]
    async fn test_register_same_email_twice_is_conflict() {
        let (service, _) = service();
        service
            .register(register_request("jaime@gmail.com"))
            .await
            .unwrap();

        let err = service
            .register(register_request("JAIME@gmail.com "))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.client_message(), EMAIL_IN_USE_MESSAGE);
    }

    #[tokio::test]
    async fn test_register_rejects_blank_name_and_bad_email() {
        let (service, _) = service();

        let err = service
            .register(RegisterRequest {
                name: "   ".to_string(),
                ..register_request("jaime@gmail.com")
            })
            .await
            .unwrap_err();
        assert_eq!(err.client_message(), USER_NAME_REQUIRED_MESSAGE);

        let err = service
            .register(register_request("sin-arroba"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_login_with_correct_credentials_issues_token() {
        let (service, tokens) = service();
        service
            .register(register_request("jaime@gmail.com"))
            .await
            .unwrap();

        let response = service
            .login(login_request("Jaime@Gmail.com", "123"))
            .await
            .unwrap();
        assert_eq!(response.message, LOGIN_MESSAGE);
        assert!(!response.token.is_empty());

        let claims = tokens.validate_access_token(&response.token).unwrap();
        assert_eq!(claims.email, "jaime@gmail.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (service, _) = service();
        service
            .register(register_request("jaime@gmail.com"))
            .await
            .unwrap();

        let wrong_password = service
            .login(login_request("jaime@gmail.com", "124"))
            .await
            .unwrap_err();
        let unknown_email = service
            .login(login_request("nadie@gmail.com", "123"))
            .await
            .unwrap_err();

        for err in [wrong_password, unknown_email] {
            assert!(matches!(err, ApiError::InvalidCredentials));
            assert_eq!(err.client_message(), INVALID_CREDENTIALS_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_login_rejects_empty_fields() {
        let (service, _) = service();
        let err = service.login(login_request("", "123")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
