//! The theme store: named theme records with ownership, imported and
//! exported through the schema-constrained codec.

use chrono::Utc;
use sqlx::SqlitePool;

use super::map_unique_violation;
use crate::error::AppError;
use crate::models::theme::{ThemeRecord, ThemeSummary};
use crate::theme_codec::{self, ResolvedTheme};

/// How a client names a theme: numeric id or name. Theme names cannot
/// start with a digit, so an all-digit reference is always an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeRef {
    Id(i64),
    Name(String),
}

impl ThemeRef {
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = raw.parse::<i64>() {
                return ThemeRef::Id(id);
            }
        }
        ThemeRef::Name(raw.to_string())
    }
}

#[derive(Clone)]
pub struct ThemeStore {
    pool: SqlitePool,
}

impl ThemeStore {
    pub fn new(pool: SqlitePool) -> Self {
        ThemeStore { pool }
    }

    /// Validate, decode and store an uploaded theme under `requested_name`,
    /// owned by `owner`. Returns the new theme id.
    ///
    /// Nothing is persisted unless the whole payload passes the codec.
    /// Concurrent imports of the same name are serialized by the UNIQUE
    /// constraint on `themes.name`: exactly one wins.
    pub async fn import_theme(
        &self,
        owner: &str,
        requested_name: &str,
        raw: &[u8],
    ) -> Result<i64, AppError> {
        theme_codec::validate_theme_name(requested_name)?;
        let attrs = theme_codec::decode(raw)?;
        let payload = theme_codec::encode(&attrs);

        let result = sqlx::query(
            "INSERT INTO themes (name, owner, color, font, payload, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(requested_name)
        .bind(owner)
        .bind(attrs.derived_color())
        .bind(attrs.derived_font())
        .bind(&payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Theme name already taken"))?;

        Ok(result.last_insert_rowid())
    }

    /// Hand back the canonical wire form of a stored theme, with the name
    /// it is stored under. Private themes export only for their owner or
    /// an admin.
    pub async fn export_theme(
        &self,
        requester: &str,
        is_admin: bool,
        theme_ref: &ThemeRef,
    ) -> Result<(String, Vec<u8>), AppError> {
        let record = self
            .fetch_by_ref(theme_ref)
            .await?
            .ok_or_else(|| AppError::not_found("Theme not found"))?;
        if !record.exportable_by(requester, is_admin) {
            return Err(AppError::access_denied("You do not own this theme"));
        }
        Ok((record.name, record.payload.into_bytes()))
    }

    /// The theme a user's pages render with. Never fails over content: an
    /// unset, dangling or unreadable reference falls back to the built-in
    /// default.
    pub async fn resolve_active_theme(&self, username: &str) -> Result<ResolvedTheme, AppError> {
        let reference = sqlx::query_scalar::<_, Option<String>>(
            "SELECT theme FROM profiles WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .flatten();

        let Some(name) = reference else {
            return Ok(ResolvedTheme::built_in_default());
        };
        let Some(record) = self.fetch_by_ref(&ThemeRef::Name(name)).await? else {
            return Ok(ResolvedTheme::built_in_default());
        };
        // A deleted theme's name can be re-registered by someone else;
        // the stale reference must not expose the new owner's theme.
        if !record.visible_to(username) {
            return Ok(ResolvedTheme::built_in_default());
        }

        match theme_codec::decode(record.payload.as_bytes()) {
            Ok(attrs) => Ok(attrs.resolve()),
            Err(e) => {
                tracing::warn!(theme = %record.name, error = %e, "Stored theme payload no longer decodes");
                Ok(ResolvedTheme::built_in_default())
            }
        }
    }

    /// Point the user's profile at a theme, verifying it exists and is
    /// visible first. Returns the stored name.
    pub async fn set_active_theme(
        &self,
        username: &str,
        theme_ref: &ThemeRef,
    ) -> Result<String, AppError> {
        let record = self
            .fetch_by_ref(theme_ref)
            .await?
            .ok_or_else(|| AppError::not_found("Theme not found"))?;
        if !record.visible_to(username) {
            return Err(AppError::access_denied("You do not own this theme"));
        }

        let result = sqlx::query("UPDATE profiles SET theme = ? WHERE username = ?")
            .bind(&record.name)
            .bind(username)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Profile not found"));
        }
        Ok(record.name)
    }

    /// Public themes plus the user's own, name ascending.
    pub async fn list_visible_themes(&self, username: &str) -> Result<Vec<ThemeSummary>, AppError> {
        let themes = sqlx::query_as::<_, ThemeSummary>(
            "SELECT id, name, owner, color, font, created_at FROM themes
             WHERE owner IS NULL OR owner = ? ORDER BY name",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        Ok(themes)
    }

    async fn fetch_by_ref(&self, theme_ref: &ThemeRef) -> Result<Option<ThemeRecord>, AppError> {
        let record = match theme_ref {
            ThemeRef::Id(id) => {
                sqlx::query_as::<_, ThemeRecord>(
                    "SELECT id, name, owner, color, font, payload, created_at FROM themes WHERE id = ?",
                )
                .bind(*id)
                .fetch_optional(&self.pool)
                .await?
            }
            ThemeRef::Name(name) => {
                sqlx::query_as::<_, ThemeRecord>(
                    "SELECT id, name, owner, color, font, payload, created_at FROM themes WHERE name = ?",
                )
                .bind(name)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        Ok(record)
    }
}
