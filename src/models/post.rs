use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A feed post as stored in the `posts` table. Author name and picture are
/// denormalized onto the row at creation time. The only mutable fields are
/// the like membership set and its cardinality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub profile_picture: Option<String>,
    pub content: String,
    /// Ids of the users who currently like this post. No duplicates.
    #[serde(default)]
    pub likes: Vec<Uuid>,
    /// Cardinality of `likes`, persisted alongside it in the same write.
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Row in the `bookmarks` table. Existence of a (user, post) row is the
/// entire signal; there is nothing else to aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}
