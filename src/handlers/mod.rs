pub mod chat_handlers;
pub mod comment_handlers;
pub mod engagement_handlers;
pub mod feed_handlers;
pub mod post_handlers;
pub mod settings_handlers;
