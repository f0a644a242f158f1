// Database repository for profiles, experience, and education entries

use crate::error::{ApiError, FieldErrors};
use crate::profiles::models::{Education, Experience, ProfileRecord};
use chrono::NaiveDate;
use sqlx::PgPool;

const PROFILE_SELECT: &str = "SELECT p.id, p.user_id, u.name AS user_name, u.avatar AS user_avatar,
            p.handle, p.status, p.skills, p.company, p.website, p.location,
            p.bio, p.github_username, p.youtube, p.twitter, p.facebook,
            p.linkedin, p.instagram, p.updated_at
     FROM profiles p
     JOIN users u ON u.id = p.user_id";

/// Resolved column values for a profile insert or update
#[derive(Debug, Clone)]
pub struct ProfileColumns {
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
}

pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Option<ProfileRecord>, ApiError> {
        let profile = sqlx::query_as::<_, ProfileRecord>(&format!(
            "{} WHERE p.user_id = $1",
            PROFILE_SELECT
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    pub async fn find_by_handle(&self, handle: &str) -> Result<Option<ProfileRecord>, ApiError> {
        let profile = sqlx::query_as::<_, ProfileRecord>(&format!(
            "{} WHERE p.handle = $1",
            PROFILE_SELECT
        ))
        .bind(handle)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    pub async fn find_all(&self) -> Result<Vec<ProfileRecord>, ApiError> {
        let profiles = sqlx::query_as::<_, ProfileRecord>(&format!(
            "{} ORDER BY p.id",
            PROFILE_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }

    /// Check whether a handle is taken by someone other than the given user
    pub async fn handle_taken(&self, handle: &str, exclude_user: i32) -> Result<bool, ApiError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM profiles WHERE handle = $1 AND user_id != $2)",
        )
        .bind(handle)
        .bind(exclude_user)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists.0)
    }

    pub async fn insert_profile(
        &self,
        user_id: i32,
        cols: &ProfileColumns,
    ) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO profiles (user_id, handle, status, skills, company, website, location,
                                   bio, github_username, youtube, twitter, facebook, linkedin, instagram)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(user_id)
        .bind(&cols.handle)
        .bind(&cols.status)
        .bind(&cols.skills)
        .bind(&cols.company)
        .bind(&cols.website)
        .bind(&cols.location)
        .bind(&cols.bio)
        .bind(&cols.github_username)
        .bind(&cols.youtube)
        .bind(&cols.twitter)
        .bind(&cols.facebook)
        .bind(&cols.linkedin)
        .bind(&cols.instagram)
        .execute(&self.pool)
        .await
        .map_err(handle_conflict)?;
        Ok(())
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        cols: &ProfileColumns,
    ) -> Result<(), ApiError> {
        sqlx::query(
            "UPDATE profiles
             SET handle = $2, status = $3, skills = $4, company = $5, website = $6,
                 location = $7, bio = $8, github_username = $9, youtube = $10,
                 twitter = $11, facebook = $12, linkedin = $13, instagram = $14,
                 updated_at = NOW()
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(&cols.handle)
        .bind(&cols.status)
        .bind(&cols.skills)
        .bind(&cols.company)
        .bind(&cols.website)
        .bind(&cols.location)
        .bind(&cols.bio)
        .bind(&cols.github_username)
        .bind(&cols.youtube)
        .bind(&cols.twitter)
        .bind(&cols.facebook)
        .bind(&cols.linkedin)
        .bind(&cols.instagram)
        .execute(&self.pool)
        .await
        .map_err(handle_conflict)?;
        Ok(())
    }

    pub async fn experiences(&self, profile_id: i32) -> Result<Vec<Experience>, ApiError> {
        let entries = sqlx::query_as::<_, Experience>(
            "SELECT id, title, company, location, from_date, to_date, current, description
             FROM experiences WHERE profile_id = $1 ORDER BY from_date DESC",
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn educations(&self, profile_id: i32) -> Result<Vec<Education>, ApiError> {
        let entries = sqlx::query_as::<_, Education>(
            "SELECT id, school, degree, field_of_study, from_date, to_date, current, description
             FROM educations WHERE profile_id = $1 ORDER BY from_date DESC",
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn add_experience(
        &self,
        profile_id: i32,
        title: &str,
        company: &str,
        location: Option<&str>,
        from_date: NaiveDate,
        to_date: Option<NaiveDate>,
        current: bool,
        description: Option<&str>,
    ) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO experiences (profile_id, title, company, location, from_date, to_date, current, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(profile_id)
        .bind(title)
        .bind(company)
        .bind(location)
        .bind(from_date)
        .bind(to_date)
        .bind(current)
        .bind(description)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete an experience entry, scoped to the owning profile so one user
    /// can never remove another user's entry
    pub async fn delete_experience(&self, profile_id: i32, id: i32) -> Result<u64, ApiError> {
        let result = sqlx::query("DELETE FROM experiences WHERE id = $1 AND profile_id = $2")
            .bind(id)
            .bind(profile_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn add_education(
        &self,
        profile_id: i32,
        school: &str,
        degree: &str,
        field_of_study: &str,
        from_date: NaiveDate,
        to_date: Option<NaiveDate>,
        current: bool,
        description: Option<&str>,
    ) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO educations (profile_id, school, degree, field_of_study, from_date, to_date, current, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(profile_id)
        .bind(school)
        .bind(degree)
        .bind(field_of_study)
        .bind(from_date)
        .bind(to_date)
        .bind(current)
        .bind(description)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_education(&self, profile_id: i32, id: i32) -> Result<u64, ApiError> {
        let result = sqlx::query("DELETE FROM educations WHERE id = $1 AND profile_id = $2")
            .bind(id)
            .bind(profile_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete the account entirely. Profile, posts, comments, and likes go
    /// with it through the foreign-key cascades.
    pub async fn delete_account(&self, user_id: i32) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Map a unique-index violation on the handle column to its field error
fn handle_conflict(error: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db_err) = &error {
        if db_err.is_unique_violation() {
            return ApiError::Validation(FieldErrors::single(
                "handle",
                "That handle already exists",
            ));
        }
    }
    ApiError::Database(error)
}
