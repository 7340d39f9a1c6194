pub mod run_scrape;

pub use run_scrape::{IRunScrapeUseCase, RunScrapeError, RunScrapeUseCase, ScrapeSettings};
