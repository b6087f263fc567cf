use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::error::ApiError;
use crate::models::post::Post;
use crate::repositories::{BookmarkStore, PostStore};

/// A post annotated with the requesting user's bookmark state. The flag is
/// per-request; it is never stored on the post itself.
#[derive(Debug, Clone)]
pub struct AnnotatedPost {
    pub post: Post,
    pub is_bookmarked: bool,
}

/// One feed page, newest first.
#[derive(Debug)]
pub struct FeedPage {
    pub posts: Vec<AnnotatedPost>,
    pub has_more: bool,
}

/// Read side of the feed: reverse-chronological pages with per-viewer
/// bookmark annotation.
pub struct FeedService {
    posts: Arc<dyn PostStore>,
    bookmarks: Arc<dyn BookmarkStore>,
}

impl FeedService {
    pub fn new(posts: Arc<dyn PostStore>, bookmarks: Arc<dyn BookmarkStore>) -> Self {
        FeedService { posts, bookmarks }
    }

    /// Returns page `page` of the feed with `limit` posts per page.
    ///
    /// Page 1 is a plain limited query. Deeper pages re-derive the full
    /// ordering and treat the post at position `(page - 1) * limit` as the
    /// cursor: the page is everything strictly after it. Consecutive pages
    /// therefore tile the ordering with no gap and no overlap.
    ///
    /// `has_more` is the length heuristic `returned == limit`, which
    /// over-reports by one page whenever the total count is an exact
    /// multiple of `limit`. Callers treat a later empty page as the end.
    pub async fn get_page(
        &self,
        page: usize,
        limit: usize,
        viewer: Option<Uuid>,
    ) -> Result<FeedPage, ApiError> {
        if page < 1 || limit < 1 {
            return Err(ApiError::InvalidArgument(
                "Invalid page or limit parameter".into(),
            ));
        }

        let posts = if page == 1 {
            self.posts.list_page(limit).await?
        } else {
            let ordered = self.posts.list_all().await?;
            let skip = match (page - 1).checked_mul(limit) {
                Some(skip) => skip,
                None => {
                    return Ok(FeedPage {
                        posts: Vec::new(),
                        has_more: false,
                    });
                }
            };
            if skip >= ordered.len() {
                return Ok(FeedPage {
                    posts: Vec::new(),
                    has_more: false,
                });
            }
            ordered.into_iter().skip(skip).take(limit).collect()
        };

        let bookmarked: HashSet<Uuid> = match viewer {
            Some(user_id) => self
                .bookmarks
                .list_for_user(user_id)
                .await?
                .into_iter()
                .map(|b| b.post_id)
                .collect(),
            None => HashSet::new(),
        };

        let has_more = posts.len() == limit;
        let posts = posts
            .into_iter()
            .map(|post| AnnotatedPost {
                is_bookmarked: bookmarked.contains(&post.id),
                post,
            })
            .collect();

        Ok(FeedPage { posts, has_more })
    }
}
