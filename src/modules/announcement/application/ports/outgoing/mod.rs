pub mod category_query;
pub mod post_query;
pub mod read_tracker;
pub mod scrape_log_query;

pub use category_query::{CategoryQuery, CategoryQueryError};
pub use post_query::{PostQuery, PostQueryError};
pub use read_tracker::{ReadTracker, ReadTrackerError};
pub use scrape_log_query::{ScrapeLogQuery, ScrapeLogQueryError};
