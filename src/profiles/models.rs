// Profile data models and DTOs

use crate::validation::double_option;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Profile row joined with its owner's public fields
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRecord {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub user_avatar: String,
    pub handle: String,
    pub status: String,
    pub skills: Vec<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Experience {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    #[serde(rename = "from")]
    pub from_date: NaiveDate,
    #[serde(rename = "to")]
    pub to_date: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Education {
    pub id: i32,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    #[serde(rename = "from")]
    pub from_date: NaiveDate,
    #[serde(rename = "to")]
    pub to_date: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Owner fields embedded in profile responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileOwner {
    pub id: i32,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Default, ToSchema)]
pub struct SocialLinks {
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: i32,
    pub user: ProfileOwner,
    pub handle: String,
    pub status: String,
    pub skills: Vec<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub social: SocialLinks,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileResponse {
    pub fn from_parts(
        record: ProfileRecord,
        experience: Vec<Experience>,
        education: Vec<Education>,
    ) -> Self {
        Self {
            id: record.id,
            user: ProfileOwner {
                id: record.user_id,
                name: record.user_name,
                avatar: record.user_avatar,
            },
            handle: record.handle,
            status: record.status,
            skills: record.skills,
            company: record.company,
            website: record.website,
            location: record.location,
            bio: record.bio,
            github_username: record.github_username,
            social: SocialLinks {
                youtube: record.youtube,
                twitter: record.twitter,
                facebook: record.facebook,
                linkedin: record.linkedin,
                instagram: record.instagram,
            },
            experience,
            education,
            updated_at: record.updated_at,
        }
    }
}

/// Create-or-update profile payload.
///
/// Optional fields are tri-state: a missing key keeps the stored value,
/// an explicit null clears it, and a value sets it. Skills arrive as a
/// comma-separated string and are split server-side.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProfilePayload {
    #[serde(default)]
    #[validate(length(
        min = 2,
        max = 40,
        message = "Handle needs to be between 2 and 40 characters"
    ))]
    pub handle: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Status field is required"))]
    pub status: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Skills field is required"))]
    pub skills: String,
    #[serde(default, deserialize_with = "double_option")]
    pub company: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(url(message = "Not a valid URL"))]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub github_username: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub youtube: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub twitter: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub facebook: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub linkedin: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub instagram: Option<Option<String>>,
}

/// Resolve a tri-state patch field against the stored value
pub fn apply_patch<T>(patch: Option<Option<T>>, current: Option<T>) -> Option<T> {
    match patch {
        None => current,
        Some(value) => value,
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ExperiencePayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "Job title field is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Company field is required"))]
    pub company: String,
    pub location: Option<String>,
    #[serde(rename = "from")]
    #[validate(required(message = "From date field is required"))]
    pub from_date: Option<NaiveDate>,
    #[serde(rename = "to")]
    pub to_date: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EducationPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "School field is required"))]
    pub school: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Degree field is required"))]
    pub degree: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Field of study field is required"))]
    pub field_of_study: String,
    #[serde(rename = "from")]
    #[validate(required(message = "From date field is required"))]
    pub from_date: Option<NaiveDate>,
    #[serde(rename = "to")]
    pub to_date: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_patch_tri_state_semantics() {
        let current = Some("Acme".to_string());
        // absent keeps
        assert_eq!(apply_patch(None, current.clone()), current);
        // null clears
        assert_eq!(apply_patch::<String>(Some(None), current.clone()), None);
        // value sets
        assert_eq!(
            apply_patch(Some(Some("Initech".to_string())), current),
            Some("Initech".to_string())
        );
    }

    #[test]
    fn profile_payload_requires_handle_status_skills() {
        let payload: ProfilePayload = serde_json::from_str("{}").unwrap();
        let errors = payload.validate().unwrap_err();
        let fields: crate::error::FieldErrors = errors.into();
        assert!(fields.get("handle").is_some());
        assert_eq!(fields.get("status"), Some("Status field is required"));
        assert_eq!(fields.get("skills"), Some("Skills field is required"));
    }

    #[test]
    fn website_must_be_a_url_when_set() {
        let payload: ProfilePayload = serde_json::from_str(
            r#"{"handle": "johndoe", "status": "Developer", "skills": "Rust", "website": "not a url"}"#,
        )
        .unwrap();
        let errors = payload.validate().unwrap_err();
        let fields: crate::error::FieldErrors = errors.into();
        assert_eq!(fields.get("website"), Some("Not a valid URL"));
    }

    #[test]
    fn experience_requires_from_date() {
        let payload: ExperiencePayload =
            serde_json::from_str(r#"{"title": "Engineer", "company": "Acme"}"#).unwrap();
        let errors = payload.validate().unwrap_err();
        let fields: crate::error::FieldErrors = errors.into();
        assert_eq!(fields.get("from_date"), Some("From date field is required"));
    }

    #[test]
    fn experience_dates_use_from_to_keys() {
        let payload: ExperiencePayload = serde_json::from_str(
            r#"{"title": "Engineer", "company": "Acme", "from": "2020-01-15", "to": "2022-06-30"}"#,
        )
        .unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(
            payload.from_date,
            Some(NaiveDate::from_ymd_opt(2020, 1, 15).unwrap())
        );
        assert_eq!(
            payload.to_date,
            Some(NaiveDate::from_ymd_opt(2022, 6, 30).unwrap())
        );
    }
}
