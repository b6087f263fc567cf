use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::comment::Comment;

#[derive(Debug, Deserialize)]
pub struct CreateCommentIn {
    /// Absent counts as empty and is rejected by the handler.
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentOut {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_profile_picture: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentOut {
    fn from(comment: Comment) -> Self {
        CommentOut {
            id: comment.id,
            user_id: comment.user_id,
            user_name: comment.user_name,
            user_profile_picture: comment.user_profile_picture,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentsOut {
    pub comments: Vec<CommentOut>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentCreatedOut {
    pub comment: CommentOut,
}
