pub mod chat_dtos;
pub mod comment_dtos;
pub mod engagement_dtos;
pub mod feed_dtos;
pub mod post_dtos;
pub mod settings_dtos;
