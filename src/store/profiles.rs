//! Profiles and the per-user post feed.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::post::Post;
use crate::models::profile::Profile;

pub const MAX_POST_CHARS: usize = 5000;

/// Profile columns a client may update directly. The theme reference is
/// managed by the theme store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Bio,
    Website,
}

impl ProfileField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "bio" => Some(ProfileField::Bio),
            "website" => Some(ProfileField::Website),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct ProfileStore {
    pool: SqlitePool,
}

impl ProfileStore {
    pub fn new(pool: SqlitePool) -> Self {
        ProfileStore { pool }
    }

    pub async fn fetch_profile(&self, username: &str) -> Result<Profile, AppError> {
        sqlx::query_as::<_, Profile>(
            "SELECT username, bio, website, theme FROM profiles WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Profile not found"))
    }

    /// Each field maps to a fixed statement; the column name never comes
    /// from the request.
    pub async fn update_field(
        &self,
        username: &str,
        field: ProfileField,
        value: &str,
    ) -> Result<(), AppError> {
        let query = match field {
            ProfileField::Bio => "UPDATE profiles SET bio = ? WHERE username = ?",
            ProfileField::Website => "UPDATE profiles SET website = ? WHERE username = ?",
        };
        let result = sqlx::query(query)
            .bind(value)
            .bind(username)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Profile not found"));
        }
        Ok(())
    }

    pub async fn add_post(&self, username: &str, content: &str) -> Result<Post, AppError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("Post content required"));
        }
        if trimmed.chars().count() > MAX_POST_CHARS {
            return Err(AppError::validation("Post too long"));
        }

        let created_at = Utc::now();
        let result =
            sqlx::query("INSERT INTO posts (username, content, created_at) VALUES (?, ?, ?)")
                .bind(username)
                .bind(trimmed)
                .bind(created_at)
                .execute(&self.pool)
                .await?;

        Ok(Post {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            content: trimmed.to_string(),
            created_at,
        })
    }

    pub async fn posts_for(&self, username: &str) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, username, content, created_at FROM posts WHERE username = ? ORDER BY id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }
}
