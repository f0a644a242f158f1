mod auth;
mod config;
mod db;
mod error;
mod posts;
mod profiles;
mod state;
mod validation;

use axum::{
    routing::{delete, get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::token::TokenService;
use crate::config::AppConfig;
use crate::state::AppState;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::current_user,
        profiles::handlers::current_profile,
        profiles::handlers::all_profiles,
        profiles::handlers::profile_by_handle,
        profiles::handlers::profile_by_user,
        profiles::handlers::upsert_profile,
        profiles::handlers::add_experience,
        profiles::handlers::delete_experience,
        profiles::handlers::add_education,
        profiles::handlers::delete_education,
        profiles::handlers::delete_account,
        posts::handlers::all_posts,
        posts::handlers::post_by_id,
        posts::handlers::create_post,
        posts::handlers::delete_post,
        posts::handlers::like_post,
        posts::handlers::unlike_post,
        posts::handlers::add_comment,
        posts::handlers::delete_comment,
    ),
    components(
        schemas(
            auth::models::RegisterRequest,
            auth::models::LoginRequest,
            auth::models::LoginResponse,
            auth::models::UserResponse,
            profiles::models::ProfilePayload,
            profiles::models::ProfileResponse,
            profiles::models::ProfileOwner,
            profiles::models::SocialLinks,
            profiles::models::Experience,
            profiles::models::Education,
            profiles::models::ExperiencePayload,
            profiles::models::EducationPayload,
            posts::models::PostPayload,
            posts::models::CommentPayload,
            posts::models::PostResponse,
            posts::models::CommentResponse,
            posts::models::LikeRef,
        )
    ),
    tags(
        (name = "users", description = "Registration, login, and identity"),
        (name = "profile", description = "Developer profile management"),
        (name = "posts", description = "Posts, comments, and likes")
    ),
    info(
        title = "DevLink API",
        version = "1.0.0",
        description = "Social network for developers: profiles, posts, and stateless token auth"
    )
)]
struct ApiDoc;

/// Creates and configures the application router.
/// Protected routes are the ones whose handlers take an AuthenticatedUser;
/// everything else is public.
fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Users
        .route("/api/users/register", post(auth::handlers::register))
        .route("/api/users/login", post(auth::handlers::login))
        .route("/api/users/current", get(auth::handlers::current_user))
        // Profiles
        .route(
            "/api/profile",
            get(profiles::handlers::current_profile)
                .post(profiles::handlers::upsert_profile)
                .delete(profiles::handlers::delete_account),
        )
        .route("/api/profile/all", get(profiles::handlers::all_profiles))
        .route(
            "/api/profile/handle/:handle",
            get(profiles::handlers::profile_by_handle),
        )
        .route(
            "/api/profile/user/:user_id",
            get(profiles::handlers::profile_by_user),
        )
        .route(
            "/api/profile/experience",
            post(profiles::handlers::add_experience),
        )
        .route(
            "/api/profile/experience/:exp_id",
            delete(profiles::handlers::delete_experience),
        )
        .route(
            "/api/profile/education",
            post(profiles::handlers::add_education),
        )
        .route(
            "/api/profile/education/:edu_id",
            delete(profiles::handlers::delete_education),
        )
        // Posts
        .route(
            "/api/posts",
            get(posts::handlers::all_posts).post(posts::handlers::create_post),
        )
        .route(
            "/api/posts/:id",
            get(posts::handlers::post_by_id).delete(posts::handlers::delete_post),
        )
        .route("/api/posts/like/:id", post(posts::handlers::like_post))
        .route("/api/posts/unlike/:id", post(posts::handlers::unlike_post))
        .route("/api/posts/comment/:id", post(posts::handlers::add_comment))
        .route(
            "/api/posts/comment/:id/:comment_id",
            delete(posts::handlers::delete_comment),
        )
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("DevLink API - Starting...");

    let config = AppConfig::from_env().expect("invalid configuration");

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let tokens = TokenService::new(&config.jwt.secret, config.jwt.ttl_seconds);
    let state = AppState::new(db_pool, tokens);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("DevLink API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
