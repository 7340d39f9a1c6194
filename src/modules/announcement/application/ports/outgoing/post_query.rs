use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::announcement::application::domain::entities::{
    Post, PostFilter, PostListing, SiteStats,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum PostQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Read side of announcements. Only active posts are ever returned.
#[async_trait]
pub trait PostQuery: Send + Sync {
    /// Returns the requested page and the total matching the filter.
    async fn list(
        &self,
        filter: &PostFilter,
        listing: PostListing,
    ) -> Result<(Vec<Post>, u64), PostQueryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, PostQueryError>;

    async fn count_active(&self) -> Result<u64, PostQueryError>;

    /// `since` bounds the "recent posts" count.
    async fn site_stats(&self, since: DateTime<Utc>) -> Result<SiteStats, PostQueryError>;
}
