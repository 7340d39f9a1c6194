use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::announcement::application::{
    domain::entities::SiteStats,
    ports::outgoing::PostQuery,
};

/// Window for `posts_last_7_days`.
const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetStatsError {
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait IGetStatsUseCase: Send + Sync {
    async fn execute(&self) -> Result<SiteStats, GetStatsError>;
}

#[derive(Clone)]
pub struct GetStatsUseCase<Q>
where
    Q: PostQuery + Send + Sync,
{
    query: Q,
}

impl<Q> GetStatsUseCase<Q>
where
    Q: PostQuery + Send + Sync,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IGetStatsUseCase for GetStatsUseCase<Q>
where
    Q: PostQuery + Send + Sync,
{
    async fn execute(&self) -> Result<SiteStats, GetStatsError> {
        let since = Utc::now() - Duration::days(RECENT_WINDOW_DAYS);
        self.query
            .site_stats(since)
            .await
            .map_err(|e| GetStatsError::QueryError(e.to_string()))
    }
}
