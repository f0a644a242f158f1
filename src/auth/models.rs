// Authentication data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User database model. The password exists here only as a one-way hash;
/// the plaintext is never persisted or logged.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

/// User response model (excludes password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub avatar: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
        }
    }
}

/// Registration request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 2, max = 30, message = "Name must be between 2 and 30 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email field is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, max = 30, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Login request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email field is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password field is required"))]
    pub password: String,
}

/// Login response: the token string already carries the Bearer prefix,
/// ready to be echoed back in the Authorization header
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

/// Derive the public avatar URL for an email address.
///
/// Computed once at registration: the trimmed, lowercased email is hashed
/// and resolved through gravatar with the same size/rating/default options
/// the frontend expects.
pub fn avatar_url(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.trim().to_lowercase().as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{:x}?s=200&r=pg&d=mm",
        hasher.finalize()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_is_deterministic_and_case_insensitive() {
        let a = avatar_url("a@b.com");
        let b = avatar_url("  A@B.COM ");
        assert_eq!(a, b);
        assert!(a.starts_with("https://www.gravatar.com/avatar/"));
        assert!(a.ends_with("?s=200&r=pg&d=mm"));
    }

    #[test]
    fn different_emails_get_different_avatars() {
        assert_ne!(avatar_url("a@b.com"), avatar_url("c@d.com"));
    }

    #[test]
    fn user_response_omits_password_hash() {
        let user = User {
            id: 1,
            name: "John".to_string(),
            email: "john@example.com".to_string(),
            password_hash: "argon2-hash".to_string(),
            avatar: "url".to_string(),
            created_at: Utc::now(),
        };
        let response: UserResponse = user.into();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "john@example.com");
    }

    #[test]
    fn register_validation_reports_field_messages() {
        let request = RegisterRequest {
            name: "J".to_string(),
            email: "".to_string(),
            password: "123".to_string(),
        };
        let errors = request.validate().unwrap_err();
        let fields: crate::error::FieldErrors = errors.into();
        assert_eq!(
            fields.get("name"),
            Some("Name must be between 2 and 30 characters")
        );
        assert_eq!(fields.get("email"), Some("Email field is required"));
        assert_eq!(
            fields.get("password"),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn register_validation_flags_invalid_email() {
        let request = RegisterRequest {
            name: "John Doe".to_string(),
            email: "not-an-email".to_string(),
            password: "secret123".to_string(),
        };
        let errors = request.validate().unwrap_err();
        let fields: crate::error::FieldErrors = errors.into();
        assert_eq!(fields.get("email"), Some("Email is invalid"));
        assert!(fields.get("name").is_none());
    }
}
