use async_trait::async_trait;

use crate::announcement::application::{
    domain::entities::{PostFilter, PostListing, PostPage},
    ports::outgoing::{PostQuery, ReadTracker},
    services::annotate_read_state,
};
use crate::auth::application::domain::entities::UserId;

#[derive(Debug, Clone)]
pub struct ListPostsRequest {
    pub filter: PostFilter,
    pub listing: PostListing,
    pub viewer: Option<UserId>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListPostsError {
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait IListPostsUseCase: Send + Sync {
    async fn execute(&self, request: ListPostsRequest) -> Result<PostPage, ListPostsError>;
}

#[derive(Clone)]
pub struct ListPostsUseCase<Q, T>
where
    Q: PostQuery + Send + Sync,
    T: ReadTracker + Send + Sync,
{
    query: Q,
    tracker: T,
}

impl<Q, T> ListPostsUseCase<Q, T>
where
    Q: PostQuery + Send + Sync,
    T: ReadTracker + Send + Sync,
{
    pub fn new(query: Q, tracker: T) -> Self {
        Self { query, tracker }
    }
}

fn normalize_filter(filter: PostFilter) -> PostFilter {
    PostFilter {
        category_id: filter.category_id,
        search: filter
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    }
}

#[async_trait]
impl<Q, T> IListPostsUseCase for ListPostsUseCase<Q, T>
where
    Q: PostQuery + Send + Sync,
    T: ReadTracker + Send + Sync,
{
    async fn execute(&self, request: ListPostsRequest) -> Result<PostPage, ListPostsError> {
        let filter = normalize_filter(request.filter);

        let (mut items, total) = self
            .query
            .list(&filter, request.listing)
            .await
            .map_err(|e| ListPostsError::QueryError(e.to_string()))?;

        annotate_read_state(&self.tracker, request.viewer, &mut items).await;

        Ok(PostPage {
            items,
            total,
            skip: request.listing.skip,
            limit: request.listing.limit,
        })
    }
}
