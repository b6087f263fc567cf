use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::feed_service::AnnotatedPost;

/// Raw feed query parameters. Kept as strings so malformed values reach our
/// own validation instead of the framework's deserializer.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPostOut {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub profile_picture: Option<String>,
    pub content: String,
    #[serde(default)]
    pub likes: Vec<Uuid>,
    /// Absent on documents written before the count was tracked; readers
    /// fall back to `likes.len()`.
    #[serde(default)]
    pub like_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_bookmarked: bool,
}

impl From<AnnotatedPost> for FeedPostOut {
    fn from(annotated: AnnotatedPost) -> Self {
        let post = annotated.post;
        FeedPostOut {
            id: post.id,
            user_id: post.user_id,
            user_name: post.user_name,
            profile_picture: post.profile_picture,
            content: post.content,
            likes: post.likes,
            like_count: Some(post.like_count),
            created_at: post.created_at,
            is_bookmarked: annotated.is_bookmarked,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPageOut {
    pub posts: Vec<FeedPostOut>,
    pub has_more: bool,
}
