use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::post::Post;

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}

#[derive(Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        PostResponse {
            id: post.id,
            username: post.username,
            content: post.content,
            created_at: post.created_at,
        }
    }
}
