pub mod comment;
pub mod message;
pub mod post;
pub mod user;
