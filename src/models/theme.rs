use chrono::{DateTime, Utc};

/// A stored theme. `payload` is the canonical encoding of the attributes
/// accepted at import; `color` and `font` are derived at import time for
/// cheap listings.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ThemeRecord {
    pub id: i64,
    pub name: String,
    /// `None` marks a public theme, readable and selectable by everyone.
    pub owner: Option<String>,
    pub color: String,
    pub font: String,
    pub payload: String,
    pub created_at: DateTime<Utc>,
}

impl ThemeRecord {
    pub fn is_public(&self) -> bool {
        self.owner.is_none()
    }

    /// Whether `username` may read or select this theme.
    pub fn visible_to(&self, username: &str) -> bool {
        match &self.owner {
            None => true,
            Some(owner) => owner == username,
        }
    }

    /// Export additionally allows admins.
    pub fn exportable_by(&self, username: &str, is_admin: bool) -> bool {
        is_admin || self.visible_to(username)
    }
}

/// Listing row: a theme without its payload.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ThemeSummary {
    pub id: i64,
    pub name: String,
    pub owner: Option<String>,
    pub color: String,
    pub font: String,
    pub created_at: DateTime<Utc>,
}
