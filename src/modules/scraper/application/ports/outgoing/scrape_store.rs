use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::scraper::application::domain::{
    catalogue::CategorySpec,
    scraped::{ListedPost, PostContent, ScrapeReport, UpsertOutcome},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Persistence used by a scrape run.
#[async_trait]
pub trait ScrapeStore: Send + Sync {
    /// Insert or refresh the category by slug and return its id.
    async fn upsert_category(
        &self,
        spec: &CategorySpec,
        url: &str,
        parent_id: Option<i32>,
    ) -> Result<i32, ScrapeStoreError>;

    /// Insert the post, or update it by url and replace its attachments.
    async fn upsert_post(
        &self,
        category_id: i32,
        listed: &ListedPost,
        content: &PostContent,
    ) -> Result<UpsertOutcome, ScrapeStoreError>;

    /// Writes a `running` scrape log and returns its id.
    async fn start_run(&self, started_at: DateTime<Utc>) -> Result<i32, ScrapeStoreError>;

    async fn finish_run(&self, report: &ScrapeReport) -> Result<(), ScrapeStoreError>;
}
