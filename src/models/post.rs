use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
