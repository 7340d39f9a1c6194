use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::application::domain::entities::UserId;
use crate::billing::application::domain::entities::{
    Activation, ExpirySweep, NewPayment, Renewal, RenewalCandidate, SubscriptionRecord,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionRepositoryError {
    #[error("User not found")]
    UserNotFound,
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Billing state of users and their payment ledger.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn find(&self, user_id: UserId)
        -> Result<Option<SubscriptionRecord>, SubscriptionRepositoryError>;

    async fn record_payment(&self, payment: NewPayment) -> Result<(), SubscriptionRepositoryError>;

    /// Marks the user `active` for the given period and books the payment,
    /// atomically.
    async fn activate(&self, activation: Activation) -> Result<(), SubscriptionRepositoryError>;

    /// Marks the user `expired` and books the reversal, atomically.
    async fn reverse(
        &self,
        user_id: UserId,
        payment: NewPayment,
    ) -> Result<(), SubscriptionRepositoryError>;

    async fn mark_cancelled(&self, user_id: UserId) -> Result<(), SubscriptionRepositoryError>;

    /// Expires every trial and paid period that ended before `now`, turns
    /// push off for those users and deletes their push subscriptions.
    async fn expire_lapsed(&self, now: DateTime<Utc>)
        -> Result<ExpirySweep, SubscriptionRepositoryError>;

    /// Active subscriptions with a stored transaction id whose period ends
    /// in `(now, until]`.
    async fn renewal_candidates(
        &self,
        now: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<RenewalCandidate>, SubscriptionRepositoryError>;

    /// Whether a payment of `payment_type` was booked for the user after `since`.
    async fn has_payment_since(
        &self,
        user_id: UserId,
        payment_type: &str,
        since: DateTime<Utc>,
    ) -> Result<bool, SubscriptionRepositoryError>;

    /// Moves the period end, stores the new transaction id and books the
    /// payment, atomically.
    async fn renew(&self, renewal: Renewal) -> Result<(), SubscriptionRepositoryError>;
}
