use std::sync::Arc;

use async_trait::async_trait;

use crate::announcement::application::{
    domain::entities::{Category, Post},
    ports::outgoing::{CategoryQuery, PostQuery, ReadTracker},
    use_cases::recent_posts::IRecentPostsUseCase,
};
use crate::auth::application::domain::entities::{UserAccount, UserId};
use crate::auth::application::use_cases::get_current_user::{
    GetCurrentUserError, IGetCurrentUserUseCase,
};

pub const DASHBOARD_RECENT_POSTS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub user: UserAccount,
    pub total_posts: u64,
    pub unread_posts: u64,
    pub categories: Vec<Category>,
    pub recent_posts: Vec<Post>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetDashboardError {
    #[error("User not found")]
    UserNotFound,
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait IGetDashboardUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<Dashboard, GetDashboardError>;
}

pub struct GetDashboardUseCase<P, C, T>
where
    P: PostQuery + Send + Sync,
    C: CategoryQuery + Send + Sync,
    T: ReadTracker + Send + Sync,
{
    current_user: Arc<dyn IGetCurrentUserUseCase + Send + Sync>,
    recent_posts: Arc<dyn IRecentPostsUseCase + Send + Sync>,
    posts: P,
    categories: C,
    tracker: T,
}

impl<P, C, T> GetDashboardUseCase<P, C, T>
where
    P: PostQuery + Send + Sync,
    C: CategoryQuery + Send + Sync,
    T: ReadTracker + Send + Sync,
{
    pub fn new(
        current_user: Arc<dyn IGetCurrentUserUseCase + Send + Sync>,
        recent_posts: Arc<dyn IRecentPostsUseCase + Send + Sync>,
        posts: P,
        categories: C,
        tracker: T,
    ) -> Self {
        Self {
            current_user,
            recent_posts,
            posts,
            categories,
            tracker,
        }
    }
}

fn query_error(e: impl std::fmt::Display) -> GetDashboardError {
    GetDashboardError::QueryError(e.to_string())
}

#[async_trait]
impl<P, C, T> IGetDashboardUseCase for GetDashboardUseCase<P, C, T>
where
    P: PostQuery + Send + Sync,
    C: CategoryQuery + Send + Sync,
    T: ReadTracker + Send + Sync,
{
    async fn execute(&self, user_id: UserId) -> Result<Dashboard, GetDashboardError> {
        // Goes through the lazy-expiry path so the dashboard shows the real status.
        let user = self
            .current_user
            .execute(user_id)
            .await
            .map_err(|e| match e {
                GetCurrentUserError::UserNotFound => GetDashboardError::UserNotFound,
                other => query_error(other),
            })?;

        let total_posts = self.posts.count_active().await.map_err(query_error)?;
        let read_posts = self.tracker.count_read(user_id).await.map_err(query_error)?;
        let categories = self.categories.list(None, true).await.map_err(query_error)?;
        let recent_posts = self
            .recent_posts
            .execute(DASHBOARD_RECENT_POSTS, Some(user_id))
            .await
            .map_err(query_error)?;

        Ok(Dashboard {
            user,
            total_posts,
            unread_posts: total_posts.saturating_sub(read_posts),
            categories,
            recent_posts,
        })
    }
}
