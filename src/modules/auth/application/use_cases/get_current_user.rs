use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::auth::application::{
    domain::entities::{UserAccount, UserId},
    ports::outgoing::{UserQuery, UserRepository},
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetCurrentUserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Query error: {0}")]
    QueryError(String),
}

/// Loads the caller's account, expiring a lapsed trial or subscription
/// before it is returned. Expiry also turns push off.
#[async_trait]
pub trait IGetCurrentUserUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<UserAccount, GetCurrentUserError>;
}

#[derive(Clone)]
pub struct GetCurrentUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
}

impl<Q, R> GetCurrentUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> IGetCurrentUserUseCase for GetCurrentUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, user_id: UserId) -> Result<UserAccount, GetCurrentUserError> {
        let mut account = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| GetCurrentUserError::QueryError(e.to_string()))?
            .ok_or(GetCurrentUserError::UserNotFound)?;

        let now = Utc::now();
        if let Some(next) = account.subscription_window().lapsed_status(now) {
            match self.repository.expire_subscription(user_id, now).await {
                Ok(removed) => info!(
                    %user_id,
                    from = %account.subscription_status,
                    push_subscriptions_removed = removed,
                    "Subscription lapsed"
                ),
                // The expiry sweep catches it on its next run.
                Err(e) => warn!(%user_id, error = %e, "Failed to persist lapsed subscription"),
            }
            account.subscription_status = next;
            account.notifications.push = false;
        }

        Ok(account)
    }
}
