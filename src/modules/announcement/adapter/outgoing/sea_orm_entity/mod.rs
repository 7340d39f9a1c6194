pub mod attachments;
pub mod categories;
pub mod posts;
pub mod scrape_logs;
pub mod user_read_posts;
