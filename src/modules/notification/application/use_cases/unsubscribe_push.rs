use async_trait::async_trait;
use tracing::info;

use crate::auth::application::domain::entities::UserId;
use crate::notification::application::ports::outgoing::PushSubscriptionRepository;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UnsubscribePushError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Returns the number of endpoints removed.
#[async_trait]
pub trait IUnsubscribePushUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<u64, UnsubscribePushError>;
}

#[derive(Clone)]
pub struct UnsubscribePushUseCase<R>
where
    R: PushSubscriptionRepository + Send + Sync,
{
    repository: R,
}

impl<R> UnsubscribePushUseCase<R>
where
    R: PushSubscriptionRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IUnsubscribePushUseCase for UnsubscribePushUseCase<R>
where
    R: PushSubscriptionRepository + Send + Sync,
{
    async fn execute(&self, user_id: UserId) -> Result<u64, UnsubscribePushError> {
        let removed = self
            .repository
            .remove_all(user_id)
            .await
            .map_err(|e| UnsubscribePushError::RepositoryError(e.to_string()))?;

        info!(%user_id, removed, "Push subscriptions removed");
        Ok(removed)
    }
}
