// Post data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Post database row. Author name and avatar are denormalized, captured
/// from the authenticated identity at creation time.
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: i32,
    pub user_id: i32,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: i32,
    pub post_id: i32,
    pub user_id: i32,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

/// A like entry in a post response: just the liking user's id
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LikeRef {
    pub user: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: i32,
    pub user: i32,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            user: row.user_id,
            text: row.text,
            name: row.name,
            avatar: row.avatar,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: i32,
    pub user: i32,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub likes: Vec<LikeRef>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn from_parts(row: PostRow, likes: Vec<LikeRef>, comments: Vec<CommentResponse>) -> Self {
        Self {
            id: row.id,
            user: row.user_id,
            text: row.text,
            name: row.name,
            avatar: row.avatar,
            likes,
            comments,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostPayload {
    #[serde(default)]
    #[validate(length(
        min = 10,
        max = 300,
        message = "Post must be between 10 and 300 characters"
    ))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CommentPayload {
    #[serde(default)]
    #[validate(length(
        min = 10,
        max = 300,
        message = "Post must be between 10 and 300 characters"
    ))]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_post_text_is_rejected() {
        let payload: PostPayload = serde_json::from_str(r#"{"text": "too short"}"#).unwrap();
        let errors = payload.validate().unwrap_err();
        let fields: crate::error::FieldErrors = errors.into();
        assert_eq!(
            fields.get("text"),
            Some("Post must be between 10 and 300 characters")
        );
    }

    #[test]
    fn missing_text_is_rejected() {
        let payload: PostPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn valid_post_text_passes() {
        let payload: PostPayload =
            serde_json::from_str(r#"{"text": "this is a perfectly fine post"}"#).unwrap();
        assert!(payload.validate().is_ok());
    }
}
