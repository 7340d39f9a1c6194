pub mod categories;
pub mod dashboard;
pub mod mark_read;
pub mod posts;
pub mod scrape_logs;
pub mod stats;

pub use categories::{get_category_handler, list_categories_handler};
pub use dashboard::dashboard_handler;
pub use mark_read::mark_read_handler;
pub use posts::{get_post_handler, list_posts_handler, recent_posts_handler};
pub use scrape_logs::scrape_logs_handler;
pub use stats::stats_handler;
