use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::comment::Comment;
use crate::models::message::DirectMessage;
use crate::models::post::{BookmarkRecord, Post};
use crate::models::user::{ProfileUpdate, UserRecord};
use crate::repositories::{BookmarkStore, CommentStore, MessageStore, PostStore, UserStore};

/// Store backed by the Supabase REST API. Every call authenticates with the
/// service role key; row-level security is not in play server-side.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(client: Client, base_url: &str, service_key: &str) -> Self {
        SupabaseStore {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.trim().to_string(),
        }
    }

    fn url(&self, table_and_query: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table_and_query)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", &self.service_key))
    }

    fn get(&self, table_and_query: &str) -> RequestBuilder {
        self.authed(self.client.get(self.url(table_and_query)))
    }

    fn post(&self, table_and_query: &str) -> RequestBuilder {
        self.authed(self.client.post(self.url(table_and_query)))
            .header("Content-Type", "application/json")
    }

    fn patch(&self, table_and_query: &str) -> RequestBuilder {
        self.authed(self.client.patch(self.url(table_and_query)))
            .header("Content-Type", "application/json")
    }

    fn delete(&self, table_and_query: &str) -> RequestBuilder {
        self.authed(self.client.delete(self.url(table_and_query)))
    }
}

async fn expect_rows<T: DeserializeOwned>(resp: Response, what: &str) -> Result<Vec<T>, StoreError> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(StoreError::Backend(format!(
            "{} failed: {} {}",
            what, status, text
        )));
    }
    serde_json::from_str(&text)
        .map_err(|e| StoreError::Backend(format!("{}: invalid json: {}", what, e)))
}

async fn expect_success(resp: Response, what: &str) -> Result<(), StoreError> {
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        return Err(StoreError::Backend(format!(
            "{} failed: {} {}",
            what, status, text
        )));
    }
    Ok(())
}

#[async_trait]
impl PostStore for SupabaseStore {
    async fn list_page(&self, limit: usize) -> Result<Vec<Post>, StoreError> {
        let resp = self
            .get(&format!(
                "posts?select=*&order=created_at.desc&limit={}",
                limit
            ))
            .send()
            .await?;
        expect_rows(resp, "list posts").await
    }

    async fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        let resp = self
            .get("posts?select=*&order=created_at.desc")
            .send()
            .await?;
        expect_rows(resp, "list all posts").await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let resp = self
            .get(&format!("posts?id=eq.{}&select=*", id))
            .send()
            .await?;
        let rows: Vec<Post> = expect_rows(resp, "get post").await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, post: &Post) -> Result<(), StoreError> {
        let resp = self
            .post("posts")
            .header("Prefer", "return=minimal")
            .json(post)
            .send()
            .await?;
        expect_success(resp, "insert post").await
    }

    async fn update_likes(
        &self,
        id: Uuid,
        likes: &[Uuid],
        like_count: i64,
    ) -> Result<(), StoreError> {
        let resp = self
            .patch(&format!("posts?id=eq.{}", id))
            .header("Prefer", "return=minimal")
            .json(&json!({ "likes": likes, "like_count": like_count }))
            .send()
            .await?;
        expect_success(resp, "update likes").await
    }
}

#[async_trait]
impl BookmarkStore for SupabaseStore {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BookmarkRecord>, StoreError> {
        let resp = self
            .get(&format!("bookmarks?user_id=eq.{}&select=*", user_id))
            .send()
            .await?;
        expect_rows(resp, "list bookmarks").await
    }

    async fn exists(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, StoreError> {
        let resp = self
            .get(&format!(
                "bookmarks?user_id=eq.{}&post_id=eq.{}&select=*",
                user_id, post_id
            ))
            .send()
            .await?;
        let rows: Vec<BookmarkRecord> = expect_rows(resp, "check bookmark").await?;
        Ok(!rows.is_empty())
    }

    async fn insert(&self, record: &BookmarkRecord) -> Result<(), StoreError> {
        // merge-duplicates keeps the (user_id, post_id) key unique on replays.
        let resp = self
            .post("bookmarks")
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(record)
            .send()
            .await?;
        expect_success(resp, "insert bookmark").await
    }

    async fn delete(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError> {
        let resp = self
            .delete(&format!(
                "bookmarks?user_id=eq.{}&post_id=eq.{}",
                user_id, post_id
            ))
            .send()
            .await?;
        expect_success(resp, "delete bookmark").await
    }
}

#[async_trait]
impl CommentStore for SupabaseStore {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, StoreError> {
        let resp = self
            .get(&format!(
                "comments?post_id=eq.{}&select=*&order=created_at.asc",
                post_id
            ))
            .send()
            .await?;
        expect_rows(resp, "list comments").await
    }

    async fn insert(&self, comment: &Comment) -> Result<(), StoreError> {
        let resp = self
            .post("comments")
            .header("Prefer", "return=minimal")
            .json(comment)
            .send()
            .await?;
        expect_success(resp, "insert comment").await
    }
}

#[async_trait]
impl MessageStore for SupabaseStore {
    async fn conversation(&self, a: Uuid, b: Uuid) -> Result<Vec<DirectMessage>, StoreError> {
        let resp = self
            .get(&format!(
                "messages?or=(and(sender_id.eq.{a},receiver_id.eq.{b}),and(sender_id.eq.{b},receiver_id.eq.{a}))&select=*&order=created_at.asc",
            ))
            .send()
            .await?;
        expect_rows(resp, "list conversation").await
    }
}

#[async_trait]
impl UserStore for SupabaseStore {
    async fn get(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let resp = self
            .get(&format!("users?id=eq.{}&select=*", id))
            .send()
            .await?;
        let rows: Vec<UserRecord> = expect_rows(resp, "get user").await?;
        Ok(rows.into_iter().next())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<UserRecord>, StoreError> {
        let resp = self
            .patch(&format!("users?id=eq.{}", id))
            .header("Prefer", "return=representation")
            .json(update)
            .send()
            .await?;
        let rows: Vec<UserRecord> = expect_rows(resp, "update profile").await?;
        Ok(rows.into_iter().next())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let resp = self
            .patch(&format!("users?id=eq.{}", id))
            .header("Prefer", "return=minimal")
            .json(&json!({ "password_hash": password_hash }))
            .send()
            .await?;
        expect_success(resp, "update password").await
    }
}
