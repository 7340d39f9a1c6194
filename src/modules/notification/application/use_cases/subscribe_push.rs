use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::use_cases::get_current_user::{
    GetCurrentUserError, IGetCurrentUserUseCase,
};
use crate::notification::application::{
    domain::entities::PushSubscription, ports::outgoing::PushSubscriptionRepository,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscribePushError {
    #[error("Invalid subscription: {0}")]
    InvalidSubscription(String),
    #[error("Push notifications require an active trial or subscription")]
    PremiumRequired,
    #[error("User not found")]
    UserNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ISubscribePushUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: UserId,
        subscription: PushSubscription,
    ) -> Result<(), SubscribePushError>;
}

pub struct SubscribePushUseCase<R>
where
    R: PushSubscriptionRepository + Send + Sync,
{
    current_user: Arc<dyn IGetCurrentUserUseCase + Send + Sync>,
    repository: R,
}

impl<R> SubscribePushUseCase<R>
where
    R: PushSubscriptionRepository + Send + Sync,
{
    pub fn new(current_user: Arc<dyn IGetCurrentUserUseCase + Send + Sync>, repository: R) -> Self {
        Self {
            current_user,
            repository,
        }
    }
}

#[async_trait]
impl<R> ISubscribePushUseCase for SubscribePushUseCase<R>
where
    R: PushSubscriptionRepository + Send + Sync,
{
    async fn execute(
        &self,
        user_id: UserId,
        subscription: PushSubscription,
    ) -> Result<(), SubscribePushError> {
        subscription
            .validate()
            .map_err(|e| SubscribePushError::InvalidSubscription(e.to_string()))?;

        let account = self
            .current_user
            .execute(user_id)
            .await
            .map_err(|e| match e {
                GetCurrentUserError::UserNotFound => SubscribePushError::UserNotFound,
                other => SubscribePushError::RepositoryError(other.to_string()),
            })?;

        if !account.has_premium_access(Utc::now()) {
            return Err(SubscribePushError::PremiumRequired);
        }

        self.repository
            .upsert(user_id, &subscription)
            .await
            .map_err(|e| SubscribePushError::RepositoryError(e.to_string()))?;

        info!(%user_id, "Push subscription stored");
        Ok(())
    }
}
