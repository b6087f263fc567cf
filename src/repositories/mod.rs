use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::comment::Comment;
use crate::models::message::DirectMessage;
use crate::models::post::{BookmarkRecord, Post};
use crate::models::user::{ProfileUpdate, UserRecord};

#[cfg(test)]
pub mod memory;
pub mod supabase;

/// Post rows, always read in reverse-chronological order. Ties on
/// `created_at` keep insertion order.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// The newest `limit` posts.
    async fn list_page(&self, limit: usize) -> Result<Vec<Post>, StoreError>;

    /// The complete ordering, newest first.
    async fn list_all(&self) -> Result<Vec<Post>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    async fn insert(&self, post: &Post) -> Result<(), StoreError>;

    /// Persist a new like membership set together with its cardinality in a
    /// single row write.
    async fn update_likes(&self, id: Uuid, likes: &[Uuid], like_count: i64)
    -> Result<(), StoreError>;
}

#[async_trait]
pub trait BookmarkStore: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BookmarkRecord>, StoreError>;

    async fn exists(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, StoreError>;

    /// Upsert; inserting an existing (user, post) pair must not duplicate it.
    async fn insert(&self, record: &BookmarkRecord) -> Result<(), StoreError>;

    async fn delete(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Comments on one post, oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, StoreError>;

    async fn insert(&self, comment: &Comment) -> Result<(), StoreError>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Every message between the two users, in either direction, oldest first.
    async fn conversation(&self, a: Uuid, b: Uuid) -> Result<Vec<DirectMessage>, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Apply the set fields and return the updated row, or `None` when the
    /// user does not exist.
    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<UserRecord>, StoreError>;

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError>;
}
