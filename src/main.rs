mod client;
mod config;
mod dtos;
mod error;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod services;

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer};
use log::{error, info};
use reqwest::Client;

use crate::config::{mask_key, Config};
use crate::error::json_error_handler;
use crate::handlers::chat_handlers::get_conversation;
use crate::handlers::comment_handlers::{create_comment, list_comments};
use crate::handlers::engagement_handlers::{toggle_bookmark, toggle_like};
use crate::handlers::feed_handlers::get_feed;
use crate::handlers::post_handlers::{create_post, get_post};
use crate::handlers::settings_handlers::{change_password, get_profile, update_profile};
use crate::repositories::supabase::SupabaseStore;
use crate::repositories::{BookmarkStore, CommentStore, MessageStore, PostStore, UserStore};
use crate::services::engagement_service::EngagementService;
use crate::services::feed_service::FeedService;

/// Shared store handles. Production wires every handle to the same
/// Supabase-backed store; tests swap in an in-memory one.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub bookmarks: Arc<dyn BookmarkStore>,
    pub comments: Arc<dyn CommentStore>,
    pub messages: Arc<dyn MessageStore>,
    pub users: Arc<dyn UserStore>,
}

#[get("/healthz")]
async fn healthz() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Supabase URL: {}", config.supabase_url);
    info!(
        "Supabase Key: {}",
        mask_key(&config.supabase_service_role_key)
    );

    let http_client = match Client::builder()
        .user_agent("linkup-be/0.1")
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to build http client: {}", e);
            std::process::exit(1);
        }
    };

    let store = SupabaseStore::new(
        http_client,
        &config.supabase_url,
        &config.supabase_service_role_key,
    );
    let state = web::Data::new(AppState {
        posts: Arc::new(store.clone()),
        bookmarks: Arc::new(store.clone()),
        comments: Arc::new(store.clone()),
        messages: Arc::new(store.clone()),
        users: Arc::new(store),
    });
    let feed = web::Data::new(FeedService::new(
        state.posts.clone(),
        state.bookmarks.clone(),
    ));
    let engagement = web::Data::new(EngagementService::new(
        state.posts.clone(),
        state.bookmarks.clone(),
    ));
    let config_data = web::Data::new(config.clone());

    let bind_address = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", bind_address);

    let allowed_origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                "authorization",
                "content-type",
                "accept",
                "x-requested-with",
            ])
            .supports_credentials()
            .max_age(3600);

        for origin in allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(state.clone())
            .app_data(feed.clone())
            .app_data(engagement.clone())
            .app_data(config_data.clone())
            .service(healthz)
            .service(
                web::scope("/api")
                    .service(get_feed)
                    .service(toggle_like)
                    .service(toggle_bookmark)
                    .service(create_post)
                    .service(get_post)
                    .service(list_comments)
                    .service(create_comment)
                    .service(get_profile)
                    .service(update_profile)
                    .service(change_password)
                    .service(get_conversation),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
