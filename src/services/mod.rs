pub mod engagement_service;
pub mod feed_service;
