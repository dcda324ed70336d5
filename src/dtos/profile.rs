use serde::{Deserialize, Serialize};

use crate::dtos::post::PostResponse;
use crate::theme_codec::ResolvedTheme;

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub field: String,
    pub value: String,
}

/// The profile page as JSON: fields, posts, files and the resolved
/// active theme.
#[derive(Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub bio: String,
    pub website: String,
    pub theme: Option<String>,
    pub active_theme: ResolvedTheme,
    pub posts: Vec<PostResponse>,
    pub files: Vec<String>,
}
