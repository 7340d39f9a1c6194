use async_trait::async_trait;

use crate::announcement::application::{
    domain::entities::{ScrapeLogEntry, ScrapeStatus},
    ports::outgoing::ScrapeLogQuery,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListScrapeLogsError {
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait IListScrapeLogsUseCase: Send + Sync {
    async fn execute(
        &self,
        status: Option<ScrapeStatus>,
        limit: u64,
    ) -> Result<Vec<ScrapeLogEntry>, ListScrapeLogsError>;
}

#[derive(Clone)]
pub struct ListScrapeLogsUseCase<Q>
where
    Q: ScrapeLogQuery + Send + Sync,
{
    query: Q,
}

impl<Q> ListScrapeLogsUseCase<Q>
where
    Q: ScrapeLogQuery + Send + Sync,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IListScrapeLogsUseCase for ListScrapeLogsUseCase<Q>
where
    Q: ScrapeLogQuery + Send + Sync,
{
    async fn execute(
        &self,
        status: Option<ScrapeStatus>,
        limit: u64,
    ) -> Result<Vec<ScrapeLogEntry>, ListScrapeLogsError> {
        self.query
            .list(status, limit)
            .await
            .map_err(|e| ListScrapeLogsError::QueryError(e.to_string()))
    }
}
