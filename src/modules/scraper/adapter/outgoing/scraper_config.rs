use std::env;
use std::time::Duration;

use crate::scraper::application::use_cases::ScrapeSettings;

pub const DEFAULT_BASE_URL: &str = "https://www.eof.gr";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq)]
pub struct ScraperConfig {
    pub base_url: String,
    pub max_pages: usize,
    pub timeout: Duration,
    pub retries: u32,
    /// Wait before the first retry; doubles on each further attempt.
    pub retry_delay: Duration,
    pub page_delay: Duration,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_pages: 10,
            timeout: Duration::from_secs(30),
            retries: 3,
            retry_delay: Duration::from_secs(1),
            page_delay: Duration::from_millis(1000),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unset, empty or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let number = |key: &str| text(key).and_then(|v| v.parse::<u64>().ok());

        Self {
            base_url: text("EOF_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            max_pages: number("SCRAPER_MAX_PAGES")
                .filter(|n| *n > 0)
                .map(|n| n as usize)
                .unwrap_or(defaults.max_pages),
            timeout: number("SCRAPER_TIMEOUT_SECS")
                .filter(|n| *n > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            retries: number("SCRAPER_RETRIES")
                .map(|n| n.clamp(1, 10) as u32)
                .unwrap_or(defaults.retries),
            retry_delay: number("SCRAPER_RETRY_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_delay),
            page_delay: number("SCRAPER_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.page_delay),
            user_agent: text("SCRAPER_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    pub fn settings(&self) -> ScrapeSettings {
        ScrapeSettings {
            base_url: self.base_url.clone(),
            max_pages: self.max_pages,
            page_delay: self.page_delay,
        }
    }
}
