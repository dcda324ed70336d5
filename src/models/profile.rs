#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Profile {
    pub username: String,
    pub bio: String,
    pub website: String,
    /// References `themes.name`; may dangle after a theme is deleted, in
    /// which case resolution falls back to the built-in default.
    pub theme: Option<String>,
}
