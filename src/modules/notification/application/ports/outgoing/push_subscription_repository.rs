use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::notification::application::domain::entities::PushSubscription;

#[derive(Debug, Clone, thiserror::Error)]
pub enum PushSubscriptionRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Stores browser push endpoints and keeps the user's `push_notifications`
/// flag in step with them.
#[async_trait]
pub trait PushSubscriptionRepository: Send + Sync {
    /// Insert, or refresh the keys of an existing (user, endpoint) row.
    /// Turns push notifications on.
    async fn upsert(
        &self,
        user_id: UserId,
        subscription: &PushSubscription,
    ) -> Result<(), PushSubscriptionRepositoryError>;

    /// Removes every endpoint of the user and turns push notifications off.
    /// Returns how many were removed.
    async fn remove_all(&self, user_id: UserId) -> Result<u64, PushSubscriptionRepositoryError>;
}
