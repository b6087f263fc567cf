//! State container for the feed screen.
//!
//! The web client keeps its own copy of the feed and mutates it eagerly:
//! likes flip before the server answers, bookmarks flip only after, and a
//! failed page fetch leaves a banner message behind. This module mirrors
//! that behavior exactly so the interactive flows can be exercised without
//! a browser. The quirks are deliberate and pinned by tests, not smoothed
//! over.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dtos::feed_dtos::{FeedPageOut, FeedPostOut};

const POSTS_PER_PAGE: usize = 10;

const LIKE_FALLBACK: &str = "Failed to like/unlike the post";
const BOOKMARK_FALLBACK: &str = "Failed to bookmark";
const FEED_FALLBACK: &str = "Failed to fetch posts";

/// One rendered post. `is_liked` is derived from the likes array at ingest
/// time; `like_count` prefers the stored counter and falls back to the
/// array length for documents written before the counter existed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub profile_picture: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub is_liked: bool,
    pub like_count: i64,
    pub is_bookmarked: bool,
}

#[derive(Debug)]
pub struct FeedView {
    pub current_user_id: Option<Uuid>,
    pub page_size: usize,
    pub posts: Vec<FeedEntry>,
    pub next_page: usize,
    pub has_more: bool,
    pub feed_error: Option<String>,
    pub like_error: Option<String>,
    pub bookmark_error: Option<String>,
}

impl FeedView {
    pub fn new(current_user_id: Option<Uuid>) -> FeedView {
        FeedView {
            current_user_id,
            page_size: POSTS_PER_PAGE,
            posts: Vec::new(),
            next_page: 1,
            has_more: true,
            feed_error: None,
            like_error: None,
            bookmark_error: None,
        }
    }

    fn entry_from_wire(&self, post: FeedPostOut) -> FeedEntry {
        let is_liked = self
            .current_user_id
            .map_or(false, |me| post.likes.contains(&me));
        let like_count = post.like_count.unwrap_or(post.likes.len() as i64);
        FeedEntry {
            id: post.id,
            user_id: post.user_id,
            user_name: post.user_name,
            profile_picture: post.profile_picture,
            content: post.content,
            created_at: post.created_at,
            is_liked,
            like_count,
            is_bookmarked: post.is_bookmarked,
        }
    }

    fn entry_mut(&mut self, post_id: Uuid) -> Option<&mut FeedEntry> {
        self.posts.iter_mut().find(|entry| entry.id == post_id)
    }

    /// Appends a fetched page. Whether more pages exist is re-derived from
    /// the page length alone; the `hasMore` flag the server sends along is
    /// not consulted. A stale feed banner stays up even when a later fetch
    /// succeeds.
    pub fn ingest_page(&mut self, page: FeedPageOut) {
        let ingested = page.posts.len();
        let entries: Vec<FeedEntry> = page
            .posts
            .into_iter()
            .map(|post| self.entry_from_wire(post))
            .collect();
        self.posts.extend(entries);
        self.has_more = ingested == self.page_size;
        self.next_page += 1;
    }

    pub fn mark_feed_failed(&mut self, message: Option<String>) {
        self.feed_error = Some(message.unwrap_or_else(|| FEED_FALLBACK.to_owned()));
    }

    /// Flips the heart before the request is sent.
    pub fn apply_optimistic_like(&mut self, post_id: Uuid) {
        if let Some(entry) = self.entry_mut(post_id) {
            entry.like_count += if entry.is_liked { -1 } else { 1 };
            entry.is_liked = !entry.is_liked;
        }
    }

    /// Overwrites the counter with the server's total. The flag keeps
    /// whatever the optimistic flip left, and any like banner stays up.
    pub fn reconcile_like(&mut self, post_id: Uuid, total_likes: i64) {
        if let Some(entry) = self.entry_mut(post_id) {
            entry.like_count = total_likes;
        }
    }

    /// Undoes a failed toggle by flipping again from the current state.
    /// When two toggles overlap in flight, the undo direction is computed
    /// against whatever the later tap left behind, so the entry can settle
    /// on the opposite of what the user last chose.
    pub fn rollback_like(&mut self, post_id: Uuid, server_message: Option<String>) {
        self.apply_optimistic_like(post_id);
        self.like_error = Some(server_message.unwrap_or_else(|| LIKE_FALLBACK.to_owned()));
    }

    /// Bookmarks are not optimistic: the flag moves in `confirm_bookmark`
    /// only, after the server has answered.
    pub fn begin_bookmark(&mut self) {
        self.bookmark_error = None;
    }

    pub fn confirm_bookmark(&mut self, post_id: Uuid) {
        if let Some(entry) = self.entry_mut(post_id) {
            entry.is_bookmarked = !entry.is_bookmarked;
        }
    }

    pub fn fail_bookmark(&mut self, message: Option<String>) {
        self.bookmark_error = Some(message.unwrap_or_else(|| BOOKMARK_FALLBACK.to_owned()));
    }

    /// Puts a freshly composed post at the top without touching pagination.
    pub fn prepend_post(&mut self, post: FeedPostOut) {
        let entry = self.entry_from_wire(post);
        self.posts.insert(0, entry);
    }
}
