// Authentication service - business logic layer

use crate::auth::{
    error::AuthError,
    models::{avatar_url, LoginResponse, RegisterRequest, User, UserResponse},
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};
use crate::error::{ApiError, FieldErrors};
use sqlx::PgPool;
use std::sync::Arc;

/// Authentication service coordinating registration and login
pub struct AuthService {
    users: UserRepository,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens,
        }
    }

    /// Register a new user. The caller has already validated the input
    /// shape; this enforces email uniqueness, derives the avatar, and
    /// hashes the password before anything is persisted.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserResponse, ApiError> {
        if self.users.email_exists(&request.email).await? {
            return Err(AuthError::EmailTaken.into());
        }

        let avatar = avatar_url(&request.email);
        // Hashing failure aborts registration; no broken credential is saved
        let password_hash = PasswordService::hash(&request.password)?;

        let user = self
            .users
            .insert_user(&request.name, &request.email, &password_hash, &avatar)
            .await?;

        tracing::info!("registered user {}", user.id);
        Ok(user.into())
    }

    /// Authenticate credentials and issue a signed token.
    /// The token string carries the Bearer prefix the client sends back.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApiError::Validation(FieldErrors::single("email", "User not found")))?;

        if !PasswordService::verify(password, &user.password_hash)? {
            return Err(ApiError::Validation(FieldErrors::single(
                "password",
                "Password incorrect",
            )));
        }

        let token = self.tokens.issue(user.id, &user.name, &user.avatar)?;

        tracing::debug!("issued token for user {}", user.id);
        Ok(LoginResponse {
            success: true,
            token: format!("Bearer {}", token),
        })
    }

    /// Look up a user by id, for the auth middleware's account-still-exists
    /// check after token verification
    pub async fn find_user(&self, id: i32) -> Result<Option<User>, AuthError> {
        self.users.find_by_id(id).await
    }
}
