// Authentication module
// JWT-based stateless authentication: registration, login, and the
// bearer-token extractor that gates protected routes

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use middleware::{ensure_owner, AuthenticatedUser};
pub use models::{LoginRequest, LoginResponse, RegisterRequest, User, UserResponse};
pub use service::AuthService;
pub use token::{Claims, TokenService};
