// HTTP handlers for profile routes

use crate::auth::middleware::AuthenticatedUser;
use crate::error::{ApiError, FieldErrors};
use crate::profiles::models::{
    apply_patch, EducationPayload, ExperiencePayload, ProfilePayload, ProfileRecord,
    ProfileResponse,
};
use crate::profiles::repository::{ProfileColumns, ProfileRepository};
use crate::state::AppState;
use crate::validation::split_skills;
use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

fn no_profile() -> ApiError {
    ApiError::NotFound(FieldErrors::single(
        "noprofile",
        "There is no profile for this user",
    ))
}

/// Assemble the full response for a profile record
async fn to_response(
    repo: &ProfileRepository,
    record: ProfileRecord,
) -> Result<ProfileResponse, ApiError> {
    let experience = repo.experiences(record.id).await?;
    let education = repo.educations(record.id).await?;
    Ok(ProfileResponse::from_parts(record, experience, education))
}

/// Get the current user's profile
/// GET /api/profile
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Current user's profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile for this user")
    ),
    tag = "profile"
)]
pub async fn current_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let repo = ProfileRepository::new(state.db.clone());
    let record = repo.find_by_user(user.id).await?.ok_or_else(no_profile)?;
    Ok(Json(to_response(&repo, record).await?))
}

/// List all profiles
/// GET /api/profile/all
#[utoipa::path(
    get,
    path = "/api/profile/all",
    responses(
        (status = 200, description = "All profiles", body = Vec<ProfileResponse>),
        (status = 404, description = "No profiles exist yet")
    ),
    tag = "profile"
)]
pub async fn all_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let repo = ProfileRepository::new(state.db.clone());
    let records = repo.find_all().await?;
    if records.is_empty() {
        return Err(ApiError::NotFound(FieldErrors::single(
            "noprofile",
            "There are no profiles",
        )));
    }

    let mut responses = Vec::with_capacity(records.len());
    for record in records {
        responses.push(to_response(&repo, record).await?);
    }
    Ok(Json(responses))
}

/// Get a profile by its handle
/// GET /api/profile/handle/:handle
#[utoipa::path(
    get,
    path = "/api/profile/handle/{handle}",
    params(("handle" = String, Path, description = "Profile handle")),
    responses(
        (status = 200, description = "Profile found", body = ProfileResponse),
        (status = 404, description = "No profile with this handle")
    ),
    tag = "profile"
)]
pub async fn profile_by_handle(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let repo = ProfileRepository::new(state.db.clone());
    let record = repo.find_by_handle(&handle).await?.ok_or_else(no_profile)?;
    Ok(Json(to_response(&repo, record).await?))
}

/// Get a profile by its owner's user id
/// GET /api/profile/user/:user_id
#[utoipa::path(
    get,
    path = "/api/profile/user/{user_id}",
    params(("user_id" = i32, Path, description = "Owning user id")),
    responses(
        (status = 200, description = "Profile found", body = ProfileResponse),
        (status = 404, description = "No profile for this user")
    ),
    tag = "profile"
)]
pub async fn profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let repo = ProfileRepository::new(state.db.clone());
    let record = repo.find_by_user(user_id).await?.ok_or_else(no_profile)?;
    Ok(Json(to_response(&repo, record).await?))
}

/// Create or update the current user's profile
/// POST /api/profile
#[utoipa::path(
    post,
    path = "/api/profile",
    request_body = ProfilePayload,
    responses(
        (status = 200, description = "Profile saved", body = ProfileResponse),
        (status = 400, description = "Validation failure or handle already exists"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "profile"
)]
pub async fn upsert_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<ProfileResponse>, ApiError> {
    payload.validate()?;

    let repo = ProfileRepository::new(state.db.clone());
    if repo.handle_taken(&payload.handle, user.id).await? {
        return Err(ApiError::Validation(FieldErrors::single(
            "handle",
            "That handle already exists",
        )));
    }

    let skills = split_skills(&payload.skills);
    let existing = repo.find_by_user(user.id).await?;

    let cols = match &existing {
        // Update: tri-state merge against the stored values
        Some(current) => ProfileColumns {
            handle: payload.handle,
            status: payload.status,
            skills,
            company: apply_patch(payload.company, current.company.clone()),
            website: apply_patch(payload.website, current.website.clone()),
            location: apply_patch(payload.location, current.location.clone()),
            bio: apply_patch(payload.bio, current.bio.clone()),
            github_username: apply_patch(payload.github_username, current.github_username.clone()),
            youtube: apply_patch(payload.youtube, current.youtube.clone()),
            twitter: apply_patch(payload.twitter, current.twitter.clone()),
            facebook: apply_patch(payload.facebook, current.facebook.clone()),
            linkedin: apply_patch(payload.linkedin, current.linkedin.clone()),
            instagram: apply_patch(payload.instagram, current.instagram.clone()),
        },
        // Create: absent and null both mean unset
        None => ProfileColumns {
            handle: payload.handle,
            status: payload.status,
            skills,
            company: payload.company.flatten(),
            website: payload.website.flatten(),
            location: payload.location.flatten(),
            bio: payload.bio.flatten(),
            github_username: payload.github_username.flatten(),
            youtube: payload.youtube.flatten(),
            twitter: payload.twitter.flatten(),
            facebook: payload.facebook.flatten(),
            linkedin: payload.linkedin.flatten(),
            instagram: payload.instagram.flatten(),
        },
    };

    if existing.is_some() {
        repo.update_profile(user.id, &cols).await?;
    } else {
        repo.insert_profile(user.id, &cols).await?;
    }

    let record = repo
        .find_by_user(user.id)
        .await?
        .ok_or_else(|| ApiError::Internal("profile missing after upsert".to_string()))?;
    Ok(Json(to_response(&repo, record).await?))
}

/// Add an experience entry to the current user's profile
/// POST /api/profile/experience
#[utoipa::path(
    post,
    path = "/api/profile/experience",
    request_body = ExperiencePayload,
    responses(
        (status = 200, description = "Profile with the new entry", body = ProfileResponse),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile for this user")
    ),
    tag = "profile"
)]
pub async fn add_experience(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<ExperiencePayload>,
) -> Result<Json<ProfileResponse>, ApiError> {
    payload.validate()?;

    let repo = ProfileRepository::new(state.db.clone());
    let record = repo.find_by_user(user.id).await?.ok_or_else(no_profile)?;

    // validate() guarantees from_date is present
    let from_date = payload
        .from_date
        .ok_or_else(|| ApiError::Internal("validated payload missing from date".to_string()))?;

    repo.add_experience(
        record.id,
        &payload.title,
        &payload.company,
        payload.location.as_deref(),
        from_date,
        payload.to_date,
        payload.current,
        payload.description.as_deref(),
    )
    .await?;

    Ok(Json(to_response(&repo, record).await?))
}

/// Remove an experience entry from the current user's profile
/// DELETE /api/profile/experience/:exp_id
#[utoipa::path(
    delete,
    path = "/api/profile/experience/{exp_id}",
    params(("exp_id" = i32, Path, description = "Experience entry id")),
    responses(
        (status = 200, description = "Profile without the entry", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile or no such entry")
    ),
    tag = "profile"
)]
pub async fn delete_experience(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(exp_id): Path<i32>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let repo = ProfileRepository::new(state.db.clone());
    let record = repo.find_by_user(user.id).await?.ok_or_else(no_profile)?;

    // Scoping the delete by profile id doubles as the ownership check
    let removed = repo.delete_experience(record.id, exp_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound(FieldErrors::single(
            "noexperience",
            "Experience entry not found",
        )));
    }

    Ok(Json(to_response(&repo, record).await?))
}

/// Add an education entry to the current user's profile
/// POST /api/profile/education
#[utoipa::path(
    post,
    path = "/api/profile/education",
    request_body = EducationPayload,
    responses(
        (status = 200, description = "Profile with the new entry", body = ProfileResponse),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile for this user")
    ),
    tag = "profile"
)]
pub async fn add_education(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<EducationPayload>,
) -> Result<Json<ProfileResponse>, ApiError> {
    payload.validate()?;

    let repo = ProfileRepository::new(state.db.clone());
    let record = repo.find_by_user(user.id).await?.ok_or_else(no_profile)?;

    let from_date = payload
        .from_date
        .ok_or_else(|| ApiError::Internal("validated payload missing from date".to_string()))?;

    repo.add_education(
        record.id,
        &payload.school,
        &payload.degree,
        &payload.field_of_study,
        from_date,
        payload.to_date,
        payload.current,
        payload.description.as_deref(),
    )
    .await?;

    Ok(Json(to_response(&repo, record).await?))
}

/// Remove an education entry from the current user's profile
/// DELETE /api/profile/education/:edu_id
#[utoipa::path(
    delete,
    path = "/api/profile/education/{edu_id}",
    params(("edu_id" = i32, Path, description = "Education entry id")),
    responses(
        (status = 200, description = "Profile without the entry", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile or no such entry")
    ),
    tag = "profile"
)]
pub async fn delete_education(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(edu_id): Path<i32>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let repo = ProfileRepository::new(state.db.clone());
    let record = repo.find_by_user(user.id).await?.ok_or_else(no_profile)?;

    let removed = repo.delete_education(record.id, edu_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound(FieldErrors::single(
            "noeducation",
            "Education entry not found",
        )));
    }

    Ok(Json(to_response(&repo, record).await?))
}

/// Delete the current user's profile and account
/// DELETE /api/profile
#[utoipa::path(
    delete,
    path = "/api/profile",
    responses(
        (status = 200, description = "Account removed"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "profile"
)]
pub async fn delete_account(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = ProfileRepository::new(state.db.clone());
    repo.delete_account(user.id).await?;
    tracing::info!("deleted account {}", user.id);
    Ok(Json(serde_json::json!({ "success": true })))
}
