use async_trait::async_trait;

use crate::announcement::application::domain::entities::{ScrapeLogEntry, ScrapeStatus};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ScrapeLogQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ScrapeLogQuery: Send + Sync {
    /// Newest first.
    async fn list(
        &self,
        status: Option<ScrapeStatus>,
        limit: u64,
    ) -> Result<Vec<ScrapeLogEntry>, ScrapeLogQueryError>;
}
