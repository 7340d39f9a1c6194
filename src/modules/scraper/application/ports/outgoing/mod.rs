pub mod page_fetcher;
pub mod scrape_store;

pub use page_fetcher::{FetchError, PageFetcher};
pub use scrape_store::{ScrapeStore, ScrapeStoreError};
