use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::billing::application::{
    domain::entities::{
        extended_end, renewal_reference, NewPayment, PaymentStatus, RecurringCharge, Renewal,
        RenewalCandidate, RenewalRun, ANNUAL_PRICE_CENTS, RENEWAL_PAYMENT_TYPE,
        RENEWAL_RETRY_DAYS, RENEWAL_WINDOW_DAYS,
    },
    ports::outgoing::{PaymentGateway, SubscriptionRepository, SubscriptionRepositoryError},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenewSubscriptionsError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Charges the stored card of every active subscription close to its end.
#[async_trait]
pub trait IRenewSubscriptionsUseCase: Send + Sync {
    async fn execute(&self) -> Result<RenewalRun, RenewSubscriptionsError>;
}

#[derive(Clone)]
pub struct RenewSubscriptionsUseCase<R, G>
where
    R: SubscriptionRepository + Send + Sync,
    G: PaymentGateway + Send + Sync,
{
    repository: R,
    gateway: G,
}

enum Attempt {
    Renewed,
    Failed,
    Skipped,
}

impl<R, G> RenewSubscriptionsUseCase<R, G>
where
    R: SubscriptionRepository + Send + Sync,
    G: PaymentGateway + Send + Sync,
{
    pub fn new(repository: R, gateway: G) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    async fn renew_one(&self, candidate: RenewalCandidate) -> Result<Attempt, SubscriptionRepositoryError> {
        let now = Utc::now();
        let user_id = candidate.user_id;

        let recently_tried = self
            .repository
            .has_payment_since(user_id, RENEWAL_PAYMENT_TYPE, now - Duration::days(RENEWAL_RETRY_DAYS))
            .await?;
        if recently_tried {
            info!(%user_id, "Renewal attempted recently, skipping");
            return Ok(Attempt::Skipped);
        }

        let charge = RecurringCharge {
            transaction_id: candidate.transaction_id,
            amount_cents: ANNUAL_PRICE_CENTS,
            merchant_reference: renewal_reference(user_id, now),
            description: "DrugAlert.gr annual renewal".to_string(),
        };

        match self.gateway.charge_recurring(charge).await {
            Ok(transaction_id) => {
                let ends_at = extended_end(Some(candidate.subscription_end), now);
                self.repository
                    .renew(Renewal {
                        user_id,
                        ends_at,
                        transaction_id: transaction_id.clone(),
                        payment: NewPayment::renewal(
                            user_id,
                            PaymentStatus::Completed,
                            Some(transaction_id),
                        ),
                    })
                    .await?;
                info!(%user_id, %ends_at, "Subscription renewed");
                Ok(Attempt::Renewed)
            }
            Err(e) => {
                warn!(%user_id, error = %e, "Renewal charge failed");
                self.repository
                    .record_payment(NewPayment::renewal(user_id, PaymentStatus::Failed, None))
                    .await?;
                Ok(Attempt::Failed)
            }
        }
    }
}

#[async_trait]
impl<R, G> IRenewSubscriptionsUseCase for RenewSubscriptionsUseCase<R, G>
where
    R: SubscriptionRepository + Send + Sync,
    G: PaymentGateway + Send + Sync,
{
    async fn execute(&self) -> Result<RenewalRun, RenewSubscriptionsError> {
        let now = Utc::now();
        let candidates = self
            .repository
            .renewal_candidates(now, now + Duration::days(RENEWAL_WINDOW_DAYS))
            .await
            .map_err(|e| RenewSubscriptionsError::RepositoryError(e.to_string()))?;

        let mut run = RenewalRun {
            candidates: candidates.len(),
            ..RenewalRun::default()
        };

        for candidate in candidates {
            let user_id = candidate.user_id;
            match self.renew_one(candidate).await {
                Ok(Attempt::Renewed) => run.renewed += 1,
                Ok(Attempt::Skipped) => run.skipped += 1,
                Ok(Attempt::Failed) => run.failed += 1,
                // One bad row must not stop the others.
                Err(e) => {
                    warn!(%user_id, error = %e, "Renewal could not be recorded");
                    run.failed += 1;
                }
            }
        }

        info!(
            candidates = run.candidates,
            renewed = run.renewed,
            failed = run.failed,
            skipped = run.skipped,
            "Renewal run finished"
        );
        Ok(run)
    }
}
