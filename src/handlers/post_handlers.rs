use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::dtos::feed_dtos::FeedPostOut;
use crate::dtos::post_dtos::{CreatePostIn, CreatePostOut, SinglePostOut};
use crate::error::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::post::Post;
use crate::services::feed_service::AnnotatedPost;
use crate::AppState;

#[post("/user/post")]
pub async fn create_post(
    body: web::Json<CreatePostIn>,
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let content = body.content.trim();
    if content.is_empty() {
        return Err(ApiError::InvalidArgument(
            "Post content cannot be empty".into(),
        ));
    }

    let author = state
        .users
        .get(user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let post = Post {
        id: Uuid::new_v4(),
        user_id: author.id,
        user_name: author.name,
        // The composer may send a fresher avatar than the stored profile.
        profile_picture: body.profile_picture.clone().or(author.profile_picture),
        content: content.to_owned(),
        likes: Vec::new(),
        like_count: 0,
        created_at: Utc::now(),
    };
    let post_id = post.id;
    state.posts.insert(&post).await?;

    Ok(HttpResponse::Created().json(CreatePostOut { post_id }))
}

#[get("/user/post/{post_id}")]
pub async fn get_post(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    identity: Option<AuthenticatedUser>,
) -> Result<HttpResponse, ApiError> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .get(post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;

    let is_bookmarked = match identity {
        Some(user) => state.bookmarks.exists(user.user_id, post_id).await?,
        None => false,
    };

    Ok(HttpResponse::Ok().json(SinglePostOut {
        post: FeedPostOut::from(AnnotatedPost { post, is_bookmarked }),
    }))
}
