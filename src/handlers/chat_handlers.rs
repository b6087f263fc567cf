use actix_web::{get, web, HttpResponse};
use uuid::Uuid;

use crate::dtos::chat_dtos::{ChatMessageOut, ConversationOut, ConversationQuery, ConversationUsersOut};
use crate::error::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::AppState;

#[get("/chat/messages")]
pub async fn get_conversation(
    query: web::Query<ConversationQuery>,
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let receiver_id = query
        .receiver_id
        .as_deref()
        .and_then(|raw| raw.parse::<Uuid>().ok())
        .ok_or_else(|| ApiError::InvalidArgument("Invalid receiver id".into()))?;

    let messages = state.messages.conversation(user.user_id, receiver_id).await?;
    let caller_avatar = state
        .users
        .get(user.user_id)
        .await?
        .and_then(|u| u.profile_picture);
    let receiver_avatar = state
        .users
        .get(receiver_id)
        .await?
        .and_then(|u| u.profile_picture);

    Ok(HttpResponse::Ok().json(ConversationOut {
        status: "ok".into(),
        messages: messages.into_iter().map(ChatMessageOut::from).collect(),
        user_info: ConversationUsersOut {
            id1: user.user_id,
            id1_avatar: caller_avatar,
            id2: receiver_id,
            id2_avatar: receiver_avatar,
        },
    }))
}
