use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dtos::feed_dtos::FeedPostOut;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostIn {
    /// Absent counts as empty and is rejected by the handler.
    #[serde(default)]
    pub content: String,
    /// Avatar the composer was showing when the post was written; wins over
    /// the stored one so the post matches what the author saw.
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostOut {
    pub post_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SinglePostOut {
    pub post: FeedPostOut,
}
