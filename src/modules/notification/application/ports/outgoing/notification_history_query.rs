use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::notification::application::domain::entities::NotificationLogEntry;

#[derive(Debug, Clone, thiserror::Error)]
pub enum NotificationHistoryQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait NotificationHistoryQuery: Send + Sync {
    /// Newest first.
    async fn list(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<NotificationLogEntry>, NotificationHistoryQueryError>;
}
