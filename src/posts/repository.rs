// Database repository for posts, comments, and likes

use crate::error::ApiError;
use crate::posts::models::{CommentRow, PostRow};
use sqlx::PgPool;

pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_post(
        &self,
        user_id: i32,
        text: &str,
        name: &str,
        avatar: &str,
    ) -> Result<PostRow, ApiError> {
        let post = sqlx::query_as::<_, PostRow>(
            "INSERT INTO posts (user_id, text, name, avatar)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, text, name, avatar, created_at",
        )
        .bind(user_id)
        .bind(text)
        .bind(name)
        .bind(avatar)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    /// All posts, newest first
    pub async fn find_all(&self) -> Result<Vec<PostRow>, ApiError> {
        let posts = sqlx::query_as::<_, PostRow>(
            "SELECT id, user_id, text, name, avatar, created_at
             FROM posts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<PostRow>, ApiError> {
        let post = sqlx::query_as::<_, PostRow>(
            "SELECT id, user_id, text, name, avatar, created_at
             FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(post)
    }

    pub async fn delete_post(&self, id: i32) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Liking user ids for a batch of posts, as (post_id, user_id) pairs
    pub async fn likes_for(&self, post_ids: &[i32]) -> Result<Vec<(i32, i32)>, ApiError> {
        let likes: Vec<(i32, i32)> = sqlx::query_as(
            "SELECT post_id, user_id FROM likes WHERE post_id = ANY($1)",
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(likes)
    }

    pub async fn comments_for(&self, post_ids: &[i32]) -> Result<Vec<CommentRow>, ApiError> {
        let comments = sqlx::query_as::<_, CommentRow>(
            "SELECT id, post_id, user_id, text, name, avatar, created_at
             FROM comments WHERE post_id = ANY($1) ORDER BY created_at",
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    /// Record a like. Returns false when the user already liked the post.
    pub async fn insert_like(&self, post_id: i32, user_id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query(
            "INSERT INTO likes (post_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a like. Returns false when there was no like to remove.
    pub async fn delete_like(&self, post_id: i32, user_id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn insert_comment(
        &self,
        post_id: i32,
        user_id: i32,
        text: &str,
        name: &str,
        avatar: &str,
    ) -> Result<CommentRow, ApiError> {
        let comment = sqlx::query_as::<_, CommentRow>(
            "INSERT INTO comments (post_id, user_id, text, name, avatar)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, post_id, user_id, text, name, avatar, created_at",
        )
        .bind(post_id)
        .bind(user_id)
        .bind(text)
        .bind(name)
        .bind(avatar)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    pub async fn find_comment(
        &self,
        post_id: i32,
        comment_id: i32,
    ) -> Result<Option<CommentRow>, ApiError> {
        let comment = sqlx::query_as::<_, CommentRow>(
            "SELECT id, post_id, user_id, text, name, avatar, created_at
             FROM comments WHERE id = $1 AND post_id = $2",
        )
        .bind(comment_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    pub async fn delete_comment(&self, comment_id: i32) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
