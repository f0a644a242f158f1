// Authentication error types
//
// These are internal to the auth core. At the HTTP boundary every token
// failure collapses into a single 401 response (see the From impl below),
// so clients cannot distinguish a bad signature from an expired token.

use crate::error::{ApiError, FieldErrors};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing authentication token")]
    MissingToken,

    /// Not a well-formed signed token
    #[error("malformed token")]
    Malformed,

    /// Tampered token or wrong signing secret
    #[error("invalid token signature")]
    SignatureInvalid,

    #[error("token has expired")]
    Expired,

    /// Token was valid but the account no longer exists
    #[error("account no longer exists")]
    UnknownAccount,

    #[error("email already registered")]
    EmailTaken,

    #[error("password hashing failed")]
    PasswordHash,

    #[error("token generation failed: {0}")]
    TokenGeneration(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::MissingToken
            | AuthError::Malformed
            | AuthError::SignatureInvalid
            | AuthError::Expired
            | AuthError::UnknownAccount => {
                // Specific cause is logged server-side only
                warn!("authentication rejected: {}", error);
                ApiError::Unauthorized
            }
            AuthError::EmailTaken => {
                ApiError::Validation(FieldErrors::single("email", "Email already exists"))
            }
            AuthError::PasswordHash => ApiError::Internal("password hashing failed".to_string()),
            AuthError::TokenGeneration(msg) => ApiError::Internal(msg),
            AuthError::Database(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn token_failures_collapse_to_unauthorized() {
        for error in [
            AuthError::MissingToken,
            AuthError::Malformed,
            AuthError::SignatureInvalid,
            AuthError::Expired,
            AuthError::UnknownAccount,
        ] {
            let api: ApiError = error.into();
            assert_eq!(api.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn email_taken_maps_to_field_error() {
        let api: ApiError = AuthError::EmailTaken.into();
        match api {
            ApiError::Validation(fields) => {
                assert_eq!(fields.get("email"), Some("Email already exists"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn internal_failures_map_to_500() {
        let api: ApiError = AuthError::PasswordHash.into();
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
