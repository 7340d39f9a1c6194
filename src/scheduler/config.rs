use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub scrape_interval: Duration,
    pub scrape_on_startup: bool,
    pub expiry_sweep_interval: Duration,
    pub renewal_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            scrape_interval: Duration::from_secs(15 * 60),
            scrape_on_startup: true,
            expiry_sweep_interval: Duration::from_secs(24 * 60 * 60),
            renewal_interval: Duration::from_secs(24 * 60 * 60),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl SchedulerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let positive = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|n| *n > 0)
        };

        Self {
            scrape_interval: positive("SCRAPE_INTERVAL_MINUTES")
                .map(|m| Duration::from_secs(m * 60))
                .unwrap_or(defaults.scrape_interval),
            scrape_on_startup: lookup("SCRAPE_ON_STARTUP")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.scrape_on_startup),
            expiry_sweep_interval: positive("EXPIRY_SWEEP_INTERVAL_HOURS")
                .map(|h| Duration::from_secs(h * 60 * 60))
                .unwrap_or(defaults.expiry_sweep_interval),
            renewal_interval: positive("RENEWAL_INTERVAL_HOURS")
                .map(|h| Duration::from_secs(h * 60 * 60))
                .unwrap_or(defaults.renewal_interval),
        }
    }
}
