use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::theme::ThemeSummary;

#[derive(Serialize)]
pub struct ImportThemeResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct SetActiveThemeRequest {
    /// Theme id or name.
    pub theme: String,
}

#[derive(Serialize)]
pub struct SetActiveThemeResponse {
    pub theme: String,
}

#[derive(Serialize)]
pub struct ThemeSummaryResponse {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub font: String,
    pub public: bool,
    pub owned: bool,
    pub created_at: DateTime<Utc>,
}

impl ThemeSummaryResponse {
    pub fn for_user(summary: ThemeSummary, username: &str) -> Self {
        let public = summary.owner.is_none();
        let owned = summary.owner.as_deref() == Some(username);
        ThemeSummaryResponse {
            id: summary.id,
            name: summary.name,
            color: summary.color,
            font: summary.font,
            public,
            owned,
            created_at: summary.created_at,
        }
    }
}
