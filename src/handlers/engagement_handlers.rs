use actix_web::{post, web, HttpResponse};

use crate::dtos::engagement_dtos::{ToggleLikeIn, ToggleLikeOut};
use crate::error::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::services::engagement_service::EngagementService;

#[post("/user/posts/like")]
pub async fn toggle_like(
    body: web::Json<ToggleLikeIn>,
    engagement: web::Data<EngagementService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let total_likes = engagement.toggle_like(body.post_id, user.user_id).await?;
    Ok(HttpResponse::Ok().json(ToggleLikeOut { total_likes }))
}

#[post("/user/post/{post_id}/bookmark")]
pub async fn toggle_bookmark(
    path: web::Path<uuid::Uuid>,
    engagement: web::Data<EngagementService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    engagement
        .toggle_bookmark(path.into_inner(), user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}
