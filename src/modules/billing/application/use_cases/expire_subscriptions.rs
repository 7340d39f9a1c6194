use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::billing::application::{
    domain::entities::ExpirySweep,
    ports::outgoing::SubscriptionRepository,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpireSubscriptionsError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Daily sweep moving every lapsed trial and paid period to `expired`.
#[async_trait]
pub trait IExpireSubscriptionsUseCase: Send + Sync {
    async fn execute(&self) -> Result<ExpirySweep, ExpireSubscriptionsError>;
}

#[derive(Clone)]
pub struct ExpireSubscriptionsUseCase<R>
where
    R: SubscriptionRepository + Send + Sync,
{
    repository: R,
}

impl<R> ExpireSubscriptionsUseCase<R>
where
    R: SubscriptionRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IExpireSubscriptionsUseCase for ExpireSubscriptionsUseCase<R>
where
    R: SubscriptionRepository + Send + Sync,
{
    async fn execute(&self) -> Result<ExpirySweep, ExpireSubscriptionsError> {
        let sweep = self
            .repository
            .expire_lapsed(Utc::now())
            .await
            .map_err(|e| ExpireSubscriptionsError::RepositoryError(e.to_string()))?;

        info!(
            expired_users = sweep.expired_users,
            push_subscriptions_removed = sweep.push_subscriptions_removed,
            "Expiry sweep finished"
        );
        Ok(sweep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::application::ports::outgoing::SubscriptionRepositoryError;
    use crate::tests::support::stubs::MockSubscriptions;

    #[tokio::test]
    async fn reports_sweep_counts() {
        let mut repo = MockSubscriptions::new();
        repo.expect_expire_lapsed().times(1).returning(|_| {
            Ok(ExpirySweep {
                expired_users: 3,
                push_subscriptions_removed: 4,
            })
        });

        let sweep = ExpireSubscriptionsUseCase::new(repo).execute().await.unwrap();
        assert_eq!(sweep.expired_users, 3);
        assert_eq!(sweep.push_subscriptions_removed, 4);
    }

    #[tokio::test]
    async fn repository_error_is_reported() {
        let mut repo = MockSubscriptions::new();
        repo.expect_expire_lapsed()
            .returning(|_| Err(SubscriptionRepositoryError::DatabaseError("down".into())));

        assert!(ExpireSubscriptionsUseCase::new(repo).execute().await.is_err());
    }
}
