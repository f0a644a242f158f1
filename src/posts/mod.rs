// Posts module
// Post CRUD plus comments and likes, with uniform ownership checks on
// every mutating route

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{CommentPayload, PostPayload, PostResponse};
pub use repository::PostRepository;
