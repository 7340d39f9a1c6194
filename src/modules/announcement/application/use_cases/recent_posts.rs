use async_trait::async_trait;

use crate::announcement::application::{
    domain::entities::{Post, PostFilter, PostListing, PostSort, SortOrder},
    ports::outgoing::{PostQuery, ReadTracker},
    services::annotate_read_state,
};
use crate::auth::application::domain::entities::UserId;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RecentPostsError {
    #[error("Query error: {0}")]
    QueryError(String),
}

/// Newest posts by scrape time.
#[async_trait]
pub trait IRecentPostsUseCase: Send + Sync {
    async fn execute(
        &self,
        limit: u64,
        viewer: Option<UserId>,
    ) -> Result<Vec<Post>, RecentPostsError>;
}

#[derive(Clone)]
pub struct RecentPostsUseCase<Q, T>
where
    Q: PostQuery + Send + Sync,
    T: ReadTracker + Send + Sync,
{
    query: Q,
    tracker: T,
}

impl<Q, T> RecentPostsUseCase<Q, T>
where
    Q: PostQuery + Send + Sync,
    T: ReadTracker + Send + Sync,
{
    pub fn new(query: Q, tracker: T) -> Self {
        Self { query, tracker }
    }
}

#[async_trait]
impl<Q, T> IRecentPostsUseCase for RecentPostsUseCase<Q, T>
where
    Q: PostQuery + Send + Sync,
    T: ReadTracker + Send + Sync,
{
    async fn execute(
        &self,
        limit: u64,
        viewer: Option<UserId>,
    ) -> Result<Vec<Post>, RecentPostsError> {
        let listing = PostListing {
            sort: PostSort::ScrapedAt,
            order: SortOrder::Desc,
            skip: 0,
            limit,
        };

        let (mut posts, _) = self
            .query
            .list(&PostFilter::default(), listing)
            .await
            .map_err(|e| RecentPostsError::QueryError(e.to_string()))?;

        annotate_read_state(&self.tracker, viewer, &mut posts).await;
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcement::application::domain::entities::SiteStats;
    use crate::announcement::application::ports::outgoing::{PostQueryError, ReadTrackerError};
    use crate::tests::support::fixtures::sample_post;
    use chrono::{DateTime, Utc};
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPostQuery {
        listings: Mutex<Vec<PostListing>>,
    }

    #[async_trait]
    impl PostQuery for RecordingPostQuery {
        async fn list(
            &self,
            _filter: &PostFilter,
            listing: PostListing,
        ) -> Result<(Vec<Post>, u64), PostQueryError> {
            self.listings.lock().unwrap().push(listing);
            Ok((vec![sample_post(9)], 1))
        }

        async fn find_by_id(&self, _id: i32) -> Result<Option<Post>, PostQueryError> {
            unimplemented!("Not used in this test")
        }

        async fn count_active(&self) -> Result<u64, PostQueryError> {
            unimplemented!("Not used in this test")
        }

        async fn site_stats(&self, _since: DateTime<Utc>) -> Result<SiteStats, PostQueryError> {
            unimplemented!("Not used in this test")
        }
    }

    struct NothingRead;

    #[async_trait]
    impl ReadTracker for NothingRead {
        async fn mark_read(&self, _user_id: UserId, _post_id: i32) -> Result<(), ReadTrackerError> {
            unimplemented!("Not used in this test")
        }

        async fn read_among(
            &self,
            _user_id: UserId,
            _post_ids: &[i32],
        ) -> Result<HashSet<i32>, ReadTrackerError> {
            Ok(HashSet::new())
        }

        async fn count_read(&self, _user_id: UserId) -> Result<u64, ReadTrackerError> {
            unimplemented!("Not used in this test")
        }
    }

    #[tokio::test]
    async fn orders_by_scrape_time_newest_first() {
        let uc = RecentPostsUseCase::new(RecordingPostQuery::default(), NothingRead);

        let posts = uc.execute(5, Some(UserId::new())).await.unwrap();

        assert_eq!(posts[0].is_read, Some(false));
        let listing = uc.query.listings.lock().unwrap()[0];
        assert_eq!(listing.sort, PostSort::ScrapedAt);
        assert_eq!(listing.order, SortOrder::Desc);
        assert_eq!((listing.skip, listing.limit), (0, 5));
    }
}
