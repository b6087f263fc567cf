use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row in the `comments` table. Commenter name and picture are denormalized
/// the same way post rows carry their author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_profile_picture: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
