pub mod get_category;
pub mod get_dashboard;
pub mod get_post;
pub mod get_stats;
pub mod list_categories;
pub mod list_posts;
pub mod list_scrape_logs;
pub mod mark_post_read;
pub mod recent_posts;
