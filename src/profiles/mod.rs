// Developer profile module
// Profile CRUD plus experience/education entries and account deletion

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{EducationPayload, ExperiencePayload, ProfilePayload, ProfileResponse};
pub use repository::ProfileRepository;
