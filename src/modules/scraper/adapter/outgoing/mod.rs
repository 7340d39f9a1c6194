pub mod http_fetcher;
pub mod scrape_store_postgres;
pub mod scraper_config;

pub use http_fetcher::HttpPageFetcher;
pub use scrape_store_postgres::ScrapeStorePostgres;
pub use scraper_config::ScraperConfig;
