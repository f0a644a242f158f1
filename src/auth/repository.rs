// Database repository for user records.
// This is the only persistence surface the auth core touches:
// find by id, find by email, insert, delete.

use crate::auth::{error::AuthError, models::User};
use sqlx::PgPool;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user. A unique-index violation on the email column is
    /// reported as EmailTaken so the handler can surface a field error.
    pub async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        avatar: &str,
    ) -> Result<User, AuthError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, avatar)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, password_hash, avatar, created_at",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(avatar)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::EmailTaken;
                }
            }
            AuthError::Database(e.to_string())
        })
    }

    /// Find a user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, avatar, created_at
             FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, avatar, created_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))
    }

    /// Check if an email is already registered
    pub async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(exists.0)
    }
}
