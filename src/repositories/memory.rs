use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::comment::Comment;
use crate::models::message::DirectMessage;
use crate::models::post::{BookmarkRecord, Post};
use crate::models::user::{ProfileUpdate, UserRecord};
use crate::repositories::{BookmarkStore, CommentStore, MessageStore, PostStore, UserStore};

/// In-memory store backing the test suite. Sorting is stable, so rows with
/// equal timestamps keep their insertion order, the same tie behavior the
/// ordered reads of the real backend give us.
#[derive(Default)]
pub struct MemoryStore {
    posts: Mutex<Vec<Post>>,
    bookmarks: Mutex<Vec<BookmarkRecord>>,
    comments: Mutex<Vec<Comment>>,
    messages: Mutex<Vec<DirectMessage>>,
    users: Mutex<Vec<UserRecord>>,
}

impl MemoryStore {
    pub fn seed_post(&self, post: Post) {
        self.posts.lock().unwrap().push(post);
    }

    pub fn seed_bookmark(&self, record: BookmarkRecord) {
        self.bookmarks.lock().unwrap().push(record);
    }

    pub fn seed_comment(&self, comment: Comment) {
        self.comments.lock().unwrap().push(comment);
    }

    pub fn seed_message(&self, message: DirectMessage) {
        self.messages.lock().unwrap().push(message);
    }

    pub fn seed_user(&self, user: UserRecord) {
        self.users.lock().unwrap().push(user);
    }
}

/// Wires one shared [`MemoryStore`] into every store handle of an `AppState`.
pub fn state(store: &Arc<MemoryStore>) -> crate::AppState {
    crate::AppState {
        posts: store.clone(),
        bookmarks: store.clone(),
        comments: store.clone(),
        messages: store.clone(),
        users: store.clone(),
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list_page(&self, limit: usize) -> Result<Vec<Post>, StoreError> {
        let mut rows = self.posts.lock().unwrap().clone();
        rows.sort_by(|x, y| y.created_at.cmp(&x.created_at));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        let mut rows = self.posts.lock().unwrap().clone();
        rows.sort_by(|x, y| y.created_at.cmp(&x.created_at));
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: &Post) -> Result<(), StoreError> {
        self.posts.lock().unwrap().push(post.clone());
        Ok(())
    }

    async fn update_likes(
        &self,
        id: Uuid,
        likes: &[Uuid],
        like_count: i64,
    ) -> Result<(), StoreError> {
        let mut rows = self.posts.lock().unwrap();
        if let Some(post) = rows.iter_mut().find(|p| p.id == id) {
            post.likes = likes.to_vec();
            post.like_count = like_count;
        }
        Ok(())
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BookmarkRecord>, StoreError> {
        Ok(self
            .bookmarks
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn exists(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, StoreError> {
        Ok(self
            .bookmarks
            .lock()
            .unwrap()
            .iter()
            .any(|b| b.user_id == user_id && b.post_id == post_id))
    }

    async fn insert(&self, record: &BookmarkRecord) -> Result<(), StoreError> {
        let mut rows = self.bookmarks.lock().unwrap();
        let duplicate = rows
            .iter()
            .any(|b| b.user_id == record.user_id && b.post_id == record.post_id);
        if !duplicate {
            rows.push(record.clone());
        }
        Ok(())
    }

    async fn delete(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError> {
        self.bookmarks
            .lock()
            .unwrap()
            .retain(|b| !(b.user_id == user_id && b.post_id == post_id));
        Ok(())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, StoreError> {
        let mut rows: Vec<Comment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        rows.sort_by(|x, y| x.created_at.cmp(&y.created_at));
        Ok(rows)
    }

    async fn insert(&self, comment: &Comment) -> Result<(), StoreError> {
        self.comments.lock().unwrap().push(comment.clone());
        Ok(())
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn conversation(&self, a: Uuid, b: Uuid) -> Result<Vec<DirectMessage>, StoreError> {
        let mut rows: Vec<DirectMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| {
                (m.sender_id == a && m.receiver_id == b)
                    || (m.sender_id == b && m.receiver_id == a)
            })
            .cloned()
            .collect();
        rows.sort_by(|x, y| x.created_at.cmp(&y.created_at));
        Ok(rows)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<UserRecord>, StoreError> {
        let mut rows = self.users.lock().unwrap();
        let Some(user) = rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        if let Some(about) = &update.about {
            user.about = Some(about.clone());
        }
        if let Some(github) = &update.github {
            user.github = Some(github.clone());
        }
        if let Some(linkedin) = &update.linkedin {
            user.linkedin = Some(linkedin.clone());
        }
        if let Some(x) = &update.x {
            user.x = Some(x.clone());
        }
        Ok(Some(user.clone()))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let mut rows = self.users.lock().unwrap();
        if let Some(user) = rows.iter_mut().find(|u| u.id == id) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }
}
