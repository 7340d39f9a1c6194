use async_trait::async_trait;
use std::collections::HashSet;

use crate::auth::application::domain::entities::UserId;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ReadTrackerError {
    #[error("Post not found")]
    PostNotFound,
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Which posts a user has opened.
#[async_trait]
pub trait ReadTracker: Send + Sync {
    /// Idempotent; marking twice keeps the first `read_at`.
    async fn mark_read(&self, user_id: UserId, post_id: i32) -> Result<(), ReadTrackerError>;

    async fn read_among(
        &self,
        user_id: UserId,
        post_ids: &[i32],
    ) -> Result<HashSet<i32>, ReadTrackerError>;

    /// Active posts the user has read.
    async fn count_read(&self, user_id: UserId) -> Result<u64, ReadTrackerError>;
}
