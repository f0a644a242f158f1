// Error handling module for the DevLink API
// Provides the central error type and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// Field-level error bag returned by validation and lookup failures.
///
/// Serializes as a flat JSON object mapping field names to messages,
/// e.g. `{"email": "Email already exists"}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error bag with a single field message
    pub fn single(field: &str, message: &str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.to_string(), message.to_string());
        Self(fields)
    }

    pub fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

/// Convert validator errors into the field-message bag, keeping the first
/// message per field
impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            if let Some(err) = errs.first() {
                let message = err
                    .message
                    .clone()
                    .map(|m| m.into_owned())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                fields.insert(field, &message);
            }
        }
        fields
    }
}

/// Main error type for the API.
/// All handlers return Result<T, ApiError>.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed input; HTTP 400 with a field-message body.
    /// Also covers duplicate email/handle and bad login credentials,
    /// which the API reports as field errors with 400.
    Validation(FieldErrors),

    /// Missing/invalid/expired token or deleted account; HTTP 401.
    /// All token failure causes collapse into this one variant so the
    /// response does not reveal which check failed.
    Unauthorized,

    /// Valid identity but not the resource owner; HTTP 403
    Forbidden,

    /// Resource absent; HTTP 404 with a field-message body
    NotFound(FieldErrors),

    /// Database failure; HTTP 500, logged but not exposed
    Database(sqlx::Error),

    /// Other internal failure; HTTP 500, logged but not exposed
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(fields) => {
                debug!("validation failed: {:?}", fields);
                (StatusCode::BAD_REQUEST, Json(fields)).into_response()
            }
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "Unauthorized" })),
            )
                .into_response(),
            ApiError::Forbidden => {
                warn!("ownership check rejected request");
                (
                    StatusCode::FORBIDDEN,
                    Json(serde_json::json!({ "notauthorized": "User not authorized" })),
                )
                    .into_response()
            }
            ApiError::NotFound(fields) => {
                debug!("resource not found: {:?}", fields);
                (StatusCode::NOT_FOUND, Json(fields)).into_response()
            }
            ApiError::Database(db_error) => {
                // Full error stays server-side; clients get an opaque message
                error!("database error: {:?}", db_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
            ApiError::Internal(message) => {
                error!("internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        ApiError::Database(error)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_field_error_serializes_flat() {
        let fields = FieldErrors::single("email", "Email already exists");
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json, serde_json::json!({ "email": "Email already exists" }));
    }

    #[test]
    fn status_codes_match_error_taxonomy() {
        assert_eq!(
            ApiError::Validation(FieldErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::NotFound(FieldErrors::new()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
