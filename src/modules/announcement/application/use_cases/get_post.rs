use async_trait::async_trait;

use crate::announcement::application::{
    domain::entities::Post,
    ports::outgoing::{PostQuery, ReadTracker},
    services::annotate_read_state,
};
use crate::auth::application::domain::entities::UserId;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetPostError {
    #[error("Post not found")]
    PostNotFound,
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait IGetPostUseCase: Send + Sync {
    async fn execute(&self, id: i32, viewer: Option<UserId>) -> Result<Post, GetPostError>;
}

#[derive(Clone)]
pub struct GetPostUseCase<Q, T>
where
    Q: PostQuery + Send + Sync,
    T: ReadTracker + Send + Sync,
{
    query: Q,
    tracker: T,
}

impl<Q, T> GetPostUseCase<Q, T>
where
    Q: PostQuery + Send + Sync,
    T: ReadTracker + Send + Sync,
{
    pub fn new(query: Q, tracker: T) -> Self {
        Self { query, tracker }
    }
}

#[async_trait]
impl<Q, T> IGetPostUseCase for GetPostUseCase<Q, T>
where
    Q: PostQuery + Send + Sync,
    T: ReadTracker + Send + Sync,
{
    async fn execute(&self, id: i32, viewer: Option<UserId>) -> Result<Post, GetPostError> {
        let post = self
            .query
            .find_by_id(id)
            .await
            .map_err(|e| GetPostError::QueryError(e.to_string()))?
            .ok_or(GetPostError::PostNotFound)?;

        let mut posts = [post];
        annotate_read_state(&self.tracker, viewer, &mut posts).await;
        let [post] = posts;
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcement::application::domain::entities::{PostFilter, PostListing, SiteStats};
    use crate::announcement::application::ports::outgoing::{PostQueryError, ReadTrackerError};
    use crate::tests::support::fixtures::sample_post;
    use chrono::{DateTime, Utc};
    use mockall::{mock, predicate::*};
    use std::collections::HashSet;

    mock! {
        pub Posts {}

        #[async_trait]
        impl PostQuery for Posts {
            async fn list(
                &self,
                filter: &PostFilter,
                listing: PostListing,
            ) -> Result<(Vec<Post>, u64), PostQueryError>;
            async fn find_by_id(&self, id: i32) -> Result<Option<Post>, PostQueryError>;
            async fn count_active(&self) -> Result<u64, PostQueryError>;
            async fn site_stats(&self, since: DateTime<Utc>) -> Result<SiteStats, PostQueryError>;
        }
    }

    mock! {
        pub Reads {}

        #[async_trait]
        impl ReadTracker for Reads {
            async fn mark_read(&self, user_id: UserId, post_id: i32) -> Result<(), ReadTrackerError>;
            async fn read_among(
                &self,
                user_id: UserId,
                post_ids: &[i32],
            ) -> Result<HashSet<i32>, ReadTrackerError>;
            async fn count_read(&self, user_id: UserId) -> Result<u64, ReadTrackerError>;
        }
    }

    #[tokio::test]
    async fn returns_post_with_read_flag() {
        let mut posts = MockPosts::new();
        posts
            .expect_find_by_id()
            .with(eq(7))
            .returning(|id| Ok(Some(sample_post(id))));
        let mut reads = MockReads::new();
        reads
            .expect_read_among()
            .returning(|_, _| Ok(HashSet::from([7])));

        let post = GetPostUseCase::new(posts, reads)
            .execute(7, Some(UserId::new()))
            .await
            .unwrap();

        assert_eq!(post.id, 7);
        assert_eq!(post.is_read, Some(true));
    }

    #[tokio::test]
    async fn anonymous_viewer_skips_read_lookup() {
        let mut posts = MockPosts::new();
        posts
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_post(id))));
        let mut reads = MockReads::new();
        reads.expect_read_among().never();

        let post = GetPostUseCase::new(posts, reads).execute(1, None).await.unwrap();
        assert_eq!(post.is_read, None);
    }

    #[tokio::test]
    async fn missing_post_is_not_found() {
        let mut posts = MockPosts::new();
        posts.expect_find_by_id().returning(|_| Ok(None));

        let result = GetPostUseCase::new(posts, MockReads::new())
            .execute(404, None)
            .await;
        assert!(matches!(result, Err(GetPostError::PostNotFound)));
    }
}
