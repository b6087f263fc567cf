use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::dtos::comment_dtos::{CommentCreatedOut, CommentOut, CommentsOut, CreateCommentIn};
use crate::error::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::comment::Comment;
use crate::AppState;

#[get("/comments/{post_id}")]
pub async fn list_comments(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let post_id = path.into_inner();
    if state.posts.get(post_id).await?.is_none() {
        return Err(ApiError::NotFound("Post not found".into()));
    }

    let comments = state.comments.list_for_post(post_id).await?;
    Ok(HttpResponse::Ok().json(CommentsOut {
        comments: comments.into_iter().map(CommentOut::from).collect(),
    }))
}

#[post("/comments/{post_id}")]
pub async fn create_comment(
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentIn>,
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let content = body.content.trim();
    if content.is_empty() {
        return Err(ApiError::InvalidArgument(
            "Comment content cannot be empty".into(),
        ));
    }

    let post_id = path.into_inner();
    if state.posts.get(post_id).await?.is_none() {
        return Err(ApiError::NotFound("Post not found".into()));
    }
    let author = state
        .users
        .get(user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let comment = Comment {
        id: Uuid::new_v4(),
        post_id,
        user_id: author.id,
        user_name: author.name,
        user_profile_picture: author.profile_picture,
        content: content.to_owned(),
        created_at: Utc::now(),
    };
    state.comments.insert(&comment).await?;

    Ok(HttpResponse::Created().json(CommentCreatedOut {
        comment: CommentOut::from(comment),
    }))
}
