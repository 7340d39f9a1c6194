use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use super::scraper_config::ScraperConfig;
use crate::scraper::application::ports::outgoing::{FetchError, PageFetcher};

/// Fetches pages over HTTP, retrying transport errors and server-side
/// statuses with exponential backoff.
#[derive(Clone, Debug)]
pub struct HttpPageFetcher {
    client: Client,
    retries: u32,
    retry_delay: Duration,
}

impl HttpPageFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("el-GR,el;q=0.9,en;q=0.8"),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            retries: config.retries.max(1),
            retry_delay: config.retry_delay,
        })
    }

    fn is_retryable(status: StatusCode) -> bool {
        status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay * 2_u32.pow(attempt.saturating_sub(1))
    }

    async fn attempt(&self, url: &str) -> Result<String, (FetchError, bool)> {
        let response = self.client.get(url).send().await.map_err(|e| {
            let err = FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            };
            (err, true)
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            };
            return Err((err, Self::is_retryable(status)));
        }

        response.text().await.map_err(|e| {
            let err = FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            };
            (err, true)
        })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 1;
        loop {
            match self.attempt(url).await {
                Ok(body) => {
                    debug!(url, attempt, bytes = body.len(), "Page fetched");
                    return Ok(body);
                }
                Err((err, retryable)) if retryable && attempt < self.retries => {
                    let delay = self.backoff(attempt);
                    warn!(url, attempt, error = %err, delay_ms = delay.as_millis() as u64, "Fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err((err, _)) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(retries: u32) -> HttpPageFetcher {
        let _ = rustls::crypto::ring::default_provider().install_default();
        let config = ScraperConfig {
            retries,
            retry_delay: Duration::from_millis(1),
            timeout: Duration::from_secs(2),
            ..ScraperConfig::default()
        };
        HttpPageFetcher::new(&config).unwrap()
    }

    #[test]
    fn backoff_doubles() {
        let f = HttpPageFetcher {
            retry_delay: Duration::from_secs(1),
            ..fetcher(3)
        };
        assert_eq!(f.backoff(1), Duration::from_secs(1));
        assert_eq!(f.backoff(2), Duration::from_secs(2));
        assert_eq!(f.backoff(3), Duration::from_secs(4));
    }

    #[test]
    fn only_server_side_statuses_are_retried() {
        assert!(HttpPageFetcher::is_retryable(StatusCode::BAD_GATEWAY));
        assert!(HttpPageFetcher::is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(!HttpPageFetcher::is_retryable(StatusCode::NOT_FOUND));
        assert!(!HttpPageFetcher::is_retryable(StatusCode::FORBIDDEN));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let result = fetcher(2).fetch("http://127.0.0.1:9/category/farmaka/").await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
