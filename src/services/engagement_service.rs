use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::post::BookmarkRecord;
use crate::repositories::{BookmarkStore, PostStore};

/// Write side of the feed: like and bookmark toggles.
pub struct EngagementService {
    posts: Arc<dyn PostStore>,
    bookmarks: Arc<dyn BookmarkStore>,
}

impl EngagementService {
    pub fn new(posts: Arc<dyn PostStore>, bookmarks: Arc<dyn BookmarkStore>) -> Self {
        EngagementService { posts, bookmarks }
    }

    /// Flips `user_id`'s membership in the post's like set and persists the
    /// set together with its new cardinality in one row write. Returns the
    /// authoritative count.
    pub async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<i64, ApiError> {
        let mut post = self
            .posts
            .get(post_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;

        if let Some(index) = post.likes.iter().position(|id| *id == user_id) {
            post.likes.remove(index);
        } else {
            post.likes.push(user_id);
        }

        let like_count = post.likes.len() as i64;
        self.posts
            .update_likes(post_id, &post.likes, like_count)
            .await?;
        Ok(like_count)
    }

    /// Creates the (user, post) bookmark record if absent, deletes it if
    /// present. Carries no count; the client flips its own flag on success.
    pub async fn toggle_bookmark(&self, post_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        if self.bookmarks.exists(user_id, post_id).await? {
            self.bookmarks.delete(user_id, post_id).await?;
        } else {
            self.bookmarks
                .insert(&BookmarkRecord {
                    user_id,
                    post_id,
                    created_at: Utc::now(),
                })
                .await?;
        }
        Ok(())
    }
}
