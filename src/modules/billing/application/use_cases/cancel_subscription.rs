use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::auth::application::domain::entities::{SubscriptionStatus, UserId};
use crate::auth::application::use_cases::get_current_user::{
    GetCurrentUserError, IGetCurrentUserUseCase,
};
use crate::billing::application::{
    domain::entities::SubscriptionOverview,
    ports::outgoing::{PaymentGateway, SubscriptionRepository, SubscriptionRepositoryError},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CancelSubscriptionError {
    #[error("No active subscription found")]
    NoActiveSubscription,
    #[error("User not found")]
    UserNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Stops renewal. Access continues until the paid period ends.
#[async_trait]
pub trait ICancelSubscriptionUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId)
        -> Result<SubscriptionOverview, CancelSubscriptionError>;
}

pub struct CancelSubscriptionUseCase<G, R>
where
    G: PaymentGateway + Send + Sync,
    R: SubscriptionRepository + Send + Sync,
{
    current_user: Arc<dyn IGetCurrentUserUseCase + Send + Sync>,
    gateway: G,
    repository: R,
}

impl<G, R> CancelSubscriptionUseCase<G, R>
where
    G: PaymentGateway + Send + Sync,
    R: SubscriptionRepository + Send + Sync,
{
    pub fn new(
        current_user: Arc<dyn IGetCurrentUserUseCase + Send + Sync>,
        gateway: G,
        repository: R,
    ) -> Self {
        Self {
            current_user,
            gateway,
            repository,
        }
    }
}

#[async_trait]
impl<G, R> ICancelSubscriptionUseCase for CancelSubscriptionUseCase<G, R>
where
    G: PaymentGateway + Send + Sync,
    R: SubscriptionRepository + Send + Sync,
{
    async fn execute(
        &self,
        user_id: UserId,
    ) -> Result<SubscriptionOverview, CancelSubscriptionError> {
        let mut account = self
            .current_user
            .execute(user_id)
            .await
            .map_err(|e| match e {
                GetCurrentUserError::UserNotFound => CancelSubscriptionError::UserNotFound,
                GetCurrentUserError::QueryError(msg) => CancelSubscriptionError::RepositoryError(msg),
            })?;

        if account.subscription_status != SubscriptionStatus::Active {
            return Err(CancelSubscriptionError::NoActiveSubscription);
        }

        let record = self
            .repository
            .find(user_id)
            .await
            .map_err(|e| CancelSubscriptionError::RepositoryError(e.to_string()))?;

        if let Some(transaction_id) = record.and_then(|r| r.transaction_id) {
            if let Err(e) = self.gateway.cancel_recurring(&transaction_id).await {
                warn!(%user_id, %transaction_id, error = %e, "Failed to revoke recurring authorisation");
            }
        }

        self.repository
            .mark_cancelled(user_id)
            .await
            .map_err(|e| match e {
                SubscriptionRepositoryError::UserNotFound => CancelSubscriptionError::UserNotFound,
                other => CancelSubscriptionError::RepositoryError(other.to_string()),
            })?;

        account.subscription_status = SubscriptionStatus::Cancelled;
        info!(%user_id, ends_at = ?account.subscription_end_date, "Subscription cancelled");

        Ok(SubscriptionOverview::for_account(&account, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::application::domain::entities::SubscriptionRecord;
    use crate::billing::application::ports::outgoing::PaymentGatewayError;
    use crate::tests::support::fixtures::sample_account;
    use crate::tests::support::stubs::{FixedCurrentUser, MockGateway, MockSubscriptions};
    use chrono::Duration;
    use mockall::predicate::eq;

    fn active_account() -> crate::auth::application::domain::entities::UserAccount {
        let mut account = sample_account();
        account.subscription_status = SubscriptionStatus::Active;
        account.subscription_end_date = Some(Utc::now() + Duration::days(200));
        account
    }

    fn record(transaction_id: Option<&str>) -> SubscriptionRecord {
        SubscriptionRecord {
            status: SubscriptionStatus::Active,
            subscription_start: Some(Utc::now() - Duration::days(165)),
            subscription_end: Some(Utc::now() + Duration::days(200)),
            transaction_id: transaction_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn cancels_and_keeps_access() {
        let account = active_account();
        let mut gateway = MockGateway::new();
        gateway
            .expect_cancel_recurring()
            .with(eq("tx-1"))
            .times(1)
            .returning(|_| Ok(()));
        let mut repo = MockSubscriptions::new();
        repo.expect_find().returning(|_| Ok(Some(record(Some("tx-1")))));
        repo.expect_mark_cancelled().times(1).returning(|_| Ok(()));

        let uc = CancelSubscriptionUseCase::new(Arc::new(FixedCurrentUser::found(account.clone())), gateway, repo);
        let overview = uc.execute(account.id).await.unwrap();

        assert_eq!(overview.status, SubscriptionStatus::Cancelled);
        assert!(overview.has_premium_access);
    }

    #[tokio::test]
    async fn gateway_failure_still_cancels_locally() {
        let account = active_account();
        let mut gateway = MockGateway::new();
        gateway
            .expect_cancel_recurring()
            .returning(|_| Err(PaymentGatewayError::RequestFailed("502".into())));
        let mut repo = MockSubscriptions::new();
        repo.expect_find().returning(|_| Ok(Some(record(Some("tx-1")))));
        repo.expect_mark_cancelled().times(1).returning(|_| Ok(()));

        let uc = CancelSubscriptionUseCase::new(Arc::new(FixedCurrentUser::found(account.clone())), gateway, repo);
        assert!(uc.execute(account.id).await.is_ok());
    }

    #[tokio::test]
    async fn no_transaction_skips_gateway() {
        let account = active_account();
        let mut gateway = MockGateway::new();
        gateway.expect_cancel_recurring().never();
        let mut repo = MockSubscriptions::new();
        repo.expect_find().returning(|_| Ok(Some(record(None))));
        repo.expect_mark_cancelled().returning(|_| Ok(()));

        let uc = CancelSubscriptionUseCase::new(Arc::new(FixedCurrentUser::found(account.clone())), gateway, repo);
        assert!(uc.execute(account.id).await.is_ok());
    }

    #[tokio::test]
    async fn trial_user_has_nothing_to_cancel() {
        let account = sample_account();
        let mut repo = MockSubscriptions::new();
        repo.expect_mark_cancelled().never();

        let uc = CancelSubscriptionUseCase::new(
            Arc::new(FixedCurrentUser::found(account.clone())),
            MockGateway::new(),
            repo,
        );
        assert_eq!(
            uc.execute(account.id).await,
            Err(CancelSubscriptionError::NoActiveSubscription)
        );
    }
}
