// HTTP handlers for post routes

use crate::auth::middleware::{ensure_owner, AuthenticatedUser};
use crate::error::{ApiError, FieldErrors};
use crate::posts::models::{
    CommentPayload, CommentResponse, LikeRef, PostPayload, PostResponse, PostRow,
};
use crate::posts::repository::PostRepository;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use std::collections::HashMap;
use validator::Validate;

fn no_post() -> ApiError {
    ApiError::NotFound(FieldErrors::single(
        "nopostfound",
        "No post found with that ID",
    ))
}

/// Load likes and comments for one post and build the response
async fn to_response(repo: &PostRepository, row: PostRow) -> Result<PostResponse, ApiError> {
    let ids = [row.id];
    let likes = repo
        .likes_for(&ids)
        .await?
        .into_iter()
        .map(|(_, user_id)| LikeRef { user: user_id })
        .collect();
    let comments = repo
        .comments_for(&ids)
        .await?
        .into_iter()
        .map(CommentResponse::from)
        .collect();
    Ok(PostResponse::from_parts(row, likes, comments))
}

/// List all posts, newest first
/// GET /api/posts
#[utoipa::path(
    get,
    path = "/api/posts",
    responses((status = 200, description = "All posts", body = Vec<PostResponse>)),
    tag = "posts"
)]
pub async fn all_posts(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let repo = PostRepository::new(state.db.clone());
    let rows = repo.find_all().await?;
    let ids: Vec<i32> = rows.iter().map(|p| p.id).collect();

    // Batch-load likes and comments, then group them per post
    let mut likes_by_post: HashMap<i32, Vec<LikeRef>> = HashMap::new();
    for (post_id, user_id) in repo.likes_for(&ids).await? {
        likes_by_post
            .entry(post_id)
            .or_default()
            .push(LikeRef { user: user_id });
    }
    let mut comments_by_post: HashMap<i32, Vec<CommentResponse>> = HashMap::new();
    for comment in repo.comments_for(&ids).await? {
        comments_by_post
            .entry(comment.post_id)
            .or_default()
            .push(comment.into());
    }

    let posts = rows
        .into_iter()
        .map(|row| {
            let likes = likes_by_post.remove(&row.id).unwrap_or_default();
            let comments = comments_by_post.remove(&row.id).unwrap_or_default();
            PostResponse::from_parts(row, likes, comments)
        })
        .collect();
    Ok(Json(posts))
}

/// Get a single post
/// GET /api/posts/:id
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post found", body = PostResponse),
        (status = 404, description = "No post with that id")
    ),
    tag = "posts"
)]
pub async fn post_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PostResponse>, ApiError> {
    let repo = PostRepository::new(state.db.clone());
    let row = repo.find_by_id(id).await?.ok_or_else(no_post)?;
    Ok(Json(to_response(&repo, row).await?))
}

/// Create a post
/// POST /api/posts
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = PostPayload,
    responses(
        (status = 200, description = "Post created", body = PostResponse),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "posts"
)]
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<PostPayload>,
) -> Result<Json<PostResponse>, ApiError> {
    payload.validate()?;

    let repo = PostRepository::new(state.db.clone());
    let row = repo
        .insert_post(user.id, &payload.text, &user.name, &user.avatar)
        .await?;
    Ok(Json(PostResponse::from_parts(row, Vec::new(), Vec::new())))
}

/// Delete a post; only its owner may do this
/// DELETE /api/posts/:id
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not the post owner"),
        (status = 404, description = "No post with that id")
    ),
    tag = "posts"
)]
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = PostRepository::new(state.db.clone());
    let row = repo.find_by_id(id).await?.ok_or_else(no_post)?;

    ensure_owner(row.user_id, &user)?;
    repo.delete_post(id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Like a post
/// POST /api/posts/like/:id
#[utoipa::path(
    post,
    path = "/api/posts/like/{id}",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post with the new like", body = PostResponse),
        (status = 400, description = "Already liked"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No post with that id")
    ),
    tag = "posts"
)]
pub async fn like_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<PostResponse>, ApiError> {
    let repo = PostRepository::new(state.db.clone());
    let row = repo.find_by_id(id).await?.ok_or_else(no_post)?;

    if !repo.insert_like(id, user.id).await? {
        return Err(ApiError::Validation(FieldErrors::single(
            "alreadyliked",
            "User already liked this post",
        )));
    }

    Ok(Json(to_response(&repo, row).await?))
}

/// Remove a like from a post
/// POST /api/posts/unlike/:id
#[utoipa::path(
    post,
    path = "/api/posts/unlike/{id}",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post without the like", body = PostResponse),
        (status = 400, description = "Not liked yet"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No post with that id")
    ),
    tag = "posts"
)]
pub async fn unlike_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<PostResponse>, ApiError> {
    let repo = PostRepository::new(state.db.clone());
    let row = repo.find_by_id(id).await?.ok_or_else(no_post)?;

    // A like can only ever be removed by the user who placed it: the delete
    // is keyed on (post, authenticated user)
    if !repo.delete_like(id, user.id).await? {
        return Err(ApiError::Validation(FieldErrors::single(
            "notliked",
            "You have not yet liked this post",
        )));
    }

    Ok(Json(to_response(&repo, row).await?))
}

/// Comment on a post
/// POST /api/posts/comment/:id
#[utoipa::path(
    post,
    path = "/api/posts/comment/{id}",
    params(("id" = i32, Path, description = "Post id")),
    request_body = CommentPayload,
    responses(
        (status = 200, description = "Post with the new comment", body = PostResponse),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No post with that id")
    ),
    tag = "posts"
)]
pub async fn add_comment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<CommentPayload>,
) -> Result<Json<PostResponse>, ApiError> {
    payload.validate()?;

    let repo = PostRepository::new(state.db.clone());
    let row = repo.find_by_id(id).await?.ok_or_else(no_post)?;

    repo.insert_comment(id, user.id, &payload.text, &user.name, &user.avatar)
        .await?;
    Ok(Json(to_response(&repo, row).await?))
}

/// Delete a comment; only the comment's author may do this
/// DELETE /api/posts/comment/:id/:comment_id
#[utoipa::path(
    delete,
    path = "/api/posts/comment/{id}/{comment_id}",
    params(
        ("id" = i32, Path, description = "Post id"),
        ("comment_id" = i32, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Post without the comment", body = PostResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not the comment author"),
        (status = 404, description = "No such post or comment")
    ),
    tag = "posts"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((id, comment_id)): Path<(i32, i32)>,
) -> Result<Json<PostResponse>, ApiError> {
    let repo = PostRepository::new(state.db.clone());
    let row = repo.find_by_id(id).await?.ok_or_else(no_post)?;

    let comment = repo.find_comment(id, comment_id).await?.ok_or_else(|| {
        ApiError::NotFound(FieldErrors::single(
            "commentnotexists",
            "Comment does not exist",
        ))
    })?;

    ensure_owner(comment.user_id, &user)?;
    repo.delete_comment(comment_id).await?;
    Ok(Json(to_response(&repo, row).await?))
}
