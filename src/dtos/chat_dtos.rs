use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::message::DirectMessage;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationQuery {
    pub receiver_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageOut {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl From<DirectMessage> for ChatMessageOut {
    fn from(message: DirectMessage) -> Self {
        ChatMessageOut {
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            text: message.text,
            timestamp: message.created_at,
        }
    }
}

/// The two participants with their avatars; id1 is the caller.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationUsersOut {
    pub id1: Uuid,
    pub id1_avatar: Option<String>,
    pub id2: Uuid,
    pub id2_avatar: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationOut {
    pub status: String,
    pub messages: Vec<ChatMessageOut>,
    pub user_info: ConversationUsersOut,
}
