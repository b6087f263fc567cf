pub mod feed_view;
