use async_trait::async_trait;
use tracing::debug;

use crate::announcement::application::ports::outgoing::{ReadTracker, ReadTrackerError};
use crate::auth::application::domain::entities::UserId;

#[derive(Debug, Clone, thiserror::Error)]
pub enum MarkPostReadError {
    #[error("Post not found")]
    PostNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait IMarkPostReadUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId, post_id: i32) -> Result<(), MarkPostReadError>;
}

#[derive(Clone)]
pub struct MarkPostReadUseCase<T>
where
    T: ReadTracker + Send + Sync,
{
    tracker: T,
}

impl<T> MarkPostReadUseCase<T>
where
    T: ReadTracker + Send + Sync,
{
    pub fn new(tracker: T) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl<T> IMarkPostReadUseCase for MarkPostReadUseCase<T>
where
    T: ReadTracker + Send + Sync,
{
    async fn execute(&self, user_id: UserId, post_id: i32) -> Result<(), MarkPostReadError> {
        self.tracker
            .mark_read(user_id, post_id)
            .await
            .map_err(|e| match e {
                ReadTrackerError::PostNotFound => MarkPostReadError::PostNotFound,
                other => MarkPostReadError::RepositoryError(other.to_string()),
            })?;

        debug!(%user_id, post_id, "Post marked as read");
        Ok(())
    }
}
