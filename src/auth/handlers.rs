// HTTP handlers for user registration, login, and the current-user echo

use crate::auth::{
    middleware::AuthenticatedUser,
    models::{LoginRequest, LoginResponse, RegisterRequest, UserResponse},
};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, Json};
use validator::Validate;

/// Register a new user
/// POST /api/users/register
#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failure or email already exists")
    ),
    tag = "users"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    request.validate()?;
    let user = state.auth.register(&request).await?;
    Ok(Json(user))
}

/// Login with email and password, returning a bearer token
/// POST /api/users/login
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Unknown email or wrong password")
    ),
    tag = "users"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;
    let response = state.auth.login(&request.email, &request.password).await?;
    Ok(Json(response))
}

/// Return the authenticated identity
/// GET /api/users/current
#[utoipa::path(
    get,
    path = "/api/users/current",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "users"
)]
pub async fn current_user(user: AuthenticatedUser) -> Json<UserResponse> {
    Json(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        avatar: user.avatar,
    })
}
