use std::num::IntErrorKind;

use actix_web::{get, web, HttpResponse};

use crate::dtos::feed_dtos::{FeedPageOut, FeedPostOut, FeedQuery};
use crate::error::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::services::feed_service::FeedService;

/// Parses a page/limit query value. The defaults mirror what the web client
/// sends on its first request. Anything that is not a whole number >= 1 is
/// rejected before it reaches the service; digit strings past the integer
/// range saturate and land on the feed's empty tail.
fn parse_page_param(raw: Option<&str>, default: usize) -> Result<usize, ApiError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow) => Ok(usize::MAX),
        _ => Err(ApiError::InvalidArgument(
            "Invalid page or limit parameter".into(),
        )),
    }
}

#[get("/feed")]
pub async fn get_feed(
    query: web::Query<FeedQuery>,
    feed: web::Data<FeedService>,
    identity: Option<AuthenticatedUser>,
) -> Result<HttpResponse, ApiError> {
    let page = parse_page_param(query.page.as_deref(), 1)?;
    let limit = parse_page_param(query.limit.as_deref(), 10)?;
    let viewer = identity.map(|user| user.user_id);

    let feed_page = feed.get_page(page, limit, viewer).await?;

    Ok(HttpResponse::Ok().json(FeedPageOut {
        posts: feed_page
            .posts
            .into_iter()
            .map(FeedPostOut::from)
            .collect(),
        has_more: feed_page.has_more,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test, App};
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::middleware::auth_extractor::test_token;
    use crate::models::post::{BookmarkRecord, Post};
    use crate::repositories::memory::MemoryStore;

    fn post_number(n: i64) -> Post {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        Post {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_name: format!("user {n}"),
            profile_picture: None,
            content: format!("post {n}"),
            likes: Vec::new(),
            like_count: 0,
            created_at: base + Duration::seconds(n),
        }
    }

    async fn get(
        store: &Arc<MemoryStore>,
        uri: &str,
        token: Option<String>,
    ) -> (u16, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Config::test()))
                .app_data(web::Data::new(FeedService::new(
                    store.clone(),
                    store.clone(),
                )))
                .service(web::scope("/api").service(get_feed)),
        )
        .await;

        let mut req = test::TestRequest::get().uri(uri);
        if let Some(token) = token {
            req = req.insert_header(("Authorization", format!("Bearer {token}")));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status().as_u16();
        let body = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn twenty_five_posts_paginate_into_three_pages() {
        let store = Arc::new(MemoryStore::default());
        for n in 0..25 {
            store.seed_post(post_number(n));
        }

        let (status, body) = get(&store, "/api/feed?page=1&limit=10", None).await;
        assert_eq!(status, 200);
        assert_eq!(body["posts"].as_array().unwrap().len(), 10);
        assert_eq!(body["hasMore"], serde_json::json!(true));
        assert_eq!(body["posts"][0]["content"], "post 24");

        let (status, body) = get(&store, "/api/feed?page=3&limit=10", None).await;
        assert_eq!(status, 200);
        assert_eq!(body["posts"].as_array().unwrap().len(), 5);
        assert_eq!(body["hasMore"], serde_json::json!(false));
        assert_eq!(body["posts"][4]["content"], "post 0");

        let (status, body) = get(&store, "/api/feed?page=4&limit=10", None).await;
        assert_eq!(status, 200);
        assert!(body["posts"].as_array().unwrap().is_empty());
        assert_eq!(body["hasMore"], serde_json::json!(false));
    }

    #[actix_web::test]
    async fn missing_params_default_to_first_page_of_ten() {
        let store = Arc::new(MemoryStore::default());
        for n in 0..12 {
            store.seed_post(post_number(n));
        }

        let (status, body) = get(&store, "/api/feed", None).await;
        assert_eq!(status, 200);
        assert_eq!(body["posts"].as_array().unwrap().len(), 10);
        assert_eq!(body["hasMore"], serde_json::json!(true));
    }

    #[actix_web::test]
    async fn non_numeric_and_zero_params_are_rejected() {
        let store = Arc::new(MemoryStore::default());
        store.seed_post(post_number(0));

        for uri in [
            "/api/feed?page=abc&limit=10",
            "/api/feed?page=1.5&limit=10",
            "/api/feed?page=1&limit=-3",
            "/api/feed?page=0&limit=10",
            "/api/feed?page=1&limit=0",
        ] {
            let (status, body) = get(&store, uri, None).await;
            assert_eq!(status, 400, "{uri} should be rejected");
            assert_eq!(body["error"], "Invalid page or limit parameter");
        }
    }

    #[actix_web::test]
    async fn numbers_past_the_integer_range_run_off_the_end() {
        let store = Arc::new(MemoryStore::default());
        store.seed_post(post_number(0));

        // A page that large skips everything; it is not a client error.
        let uri = "/api/feed?page=99999999999999999999999&limit=10";
        let (status, body) = get(&store, uri, None).await;
        assert_eq!(status, 200);
        assert!(body["posts"].as_array().unwrap().is_empty());
        assert_eq!(body["hasMore"], serde_json::json!(false));

        let uri = "/api/feed?page=1&limit=99999999999999999999999";
        let (status, body) = get(&store, uri, None).await;
        assert_eq!(status, 200);
        assert_eq!(body["posts"].as_array().unwrap().len(), 1);
        assert_eq!(body["hasMore"], serde_json::json!(false));
    }

    #[actix_web::test]
    async fn anonymous_requests_see_no_bookmarks() {
        let store = Arc::new(MemoryStore::default());
        let post = post_number(0);
        store.seed_bookmark(BookmarkRecord {
            user_id: Uuid::new_v4(),
            post_id: post.id,
            created_at: Utc::now(),
        });
        store.seed_post(post);

        let (status, body) = get(&store, "/api/feed", None).await;
        assert_eq!(status, 200);
        assert_eq!(body["posts"][0]["isBookmarked"], serde_json::json!(false));
    }

    #[actix_web::test]
    async fn bookmark_flags_follow_the_caller_identity() {
        let store = Arc::new(MemoryStore::default());
        let viewer = Uuid::new_v4();
        let bookmarked = post_number(0);
        let plain = post_number(1);
        store.seed_bookmark(BookmarkRecord {
            user_id: viewer,
            post_id: bookmarked.id,
            created_at: Utc::now(),
        });
        store.seed_post(bookmarked);
        store.seed_post(plain);

        let token = test_token(viewer, &Config::test().jwt_secret);
        let (status, body) = get(&store, "/api/feed", Some(token)).await;
        assert_eq!(status, 200);
        // Newest first, so "post 1" comes before "post 0".
        assert_eq!(body["posts"][0]["isBookmarked"], serde_json::json!(false));
        assert_eq!(body["posts"][1]["isBookmarked"], serde_json::json!(true));
    }
}
