use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Body of the page at `url`, after any retries the fetcher applies.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
