use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::auth::application::domain::entities::{SubscriptionStatus, UserId};
use crate::billing::application::{
    domain::{
        entities::{
            extended_end, user_from_merchant_reference, Activation, NewPayment, PaymentStatus,
        },
        webhook::{webhook_keys_match, WebhookEvent, WebhookEventKind},
    },
    ports::outgoing::{SubscriptionRepository, SubscriptionRepositoryError},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleWebhookError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WebhookAction {
    Activated,
    PaymentFailed,
    Reversed,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WebhookOutcome {
    pub event_type_id: i64,
    pub action: WebhookAction,
}

#[async_trait]
pub trait IHandleWebhookUseCase: Send + Sync {
    /// Key the provider expects back when it verifies the endpoint.
    fn verification_key(&self) -> Option<&str>;

    /// Whether `presented` matches the configured key. Always false when
    /// no key is configured.
    fn verify(&self, presented: &str) -> bool;

    async fn execute(&self, event: WebhookEvent) -> Result<WebhookOutcome, HandleWebhookError>;
}

pub struct HandleWebhookUseCase<R>
where
    R: SubscriptionRepository + Send + Sync,
{
    verification_key: Option<String>,
    repository: R,
}

impl<R> HandleWebhookUseCase<R>
where
    R: SubscriptionRepository + Send + Sync,
{
    pub fn new(verification_key: Option<String>, repository: R) -> Self {
        Self {
            verification_key: verification_key.filter(|k| !k.is_empty()),
            repository,
        }
    }

    fn payment(user_id: UserId, status: PaymentStatus, event: &WebhookEvent) -> NewPayment {
        let data = &event.event_data;
        let mut payment = NewPayment::annual(user_id, status);
        if let Some(cents) = data.amount_cents() {
            payment.amount_cents = cents;
        }
        payment.provider_order_code = data.order_code.map(|c| c.to_string());
        payment.provider_transaction_id = data.transaction_id.clone();
        payment
    }

    async fn activate(
        &self,
        user_id: UserId,
        event: &WebhookEvent,
    ) -> Result<(), SubscriptionRepositoryError> {
        let record = self
            .repository
            .find(user_id)
            .await?
            .ok_or(SubscriptionRepositoryError::UserNotFound)?;

        let now = Utc::now();
        let renewing = matches!(
            record.status,
            SubscriptionStatus::Active | SubscriptionStatus::Cancelled
        ) && record.subscription_end.is_some_and(|end| end > now);

        let activation = Activation {
            user_id,
            starts_at: if renewing {
                record.subscription_start.unwrap_or(now)
            } else {
                now
            },
            ends_at: extended_end(record.subscription_end, now),
            transaction_id: event.event_data.transaction_id.clone(),
            payment: Self::payment(user_id, PaymentStatus::Completed, event),
        };
        let ends_at = activation.ends_at;

        self.repository.activate(activation).await?;
        info!(%user_id, %ends_at, "Subscription activated");
        Ok(())
    }
}

#[async_trait]
impl<R> IHandleWebhookUseCase for HandleWebhookUseCase<R>
where
    R: SubscriptionRepository + Send + Sync,
{
    fn verification_key(&self) -> Option<&str> {
        self.verification_key.as_deref()
    }

    fn verify(&self, presented: &str) -> bool {
        self.verification_key
            .as_deref()
            .is_some_and(|expected| webhook_keys_match(expected, presented))
    }

    async fn execute(&self, event: WebhookEvent) -> Result<WebhookOutcome, HandleWebhookError> {
        let event_type_id = event.event_type_id;
        let ignored = WebhookOutcome {
            event_type_id,
            action: WebhookAction::Ignored,
        };

        let kind = WebhookEventKind::from(event_type_id);
        if let WebhookEventKind::Other(other) = kind {
            info!(event_type_id = other, "Ignoring webhook event");
            return Ok(ignored);
        }

        let reference = event.event_data.merchant_trns.as_deref().unwrap_or_default();
        let Some(user_id) = user_from_merchant_reference(reference) else {
            warn!(event_type_id, merchant_trns = %reference, "Webhook without a user reference");
            return Ok(ignored);
        };

        let result = match kind {
            WebhookEventKind::PaymentCreated => self
                .activate(user_id, &event)
                .await
                .map(|_| WebhookAction::Activated),
            WebhookEventKind::PaymentFailed => {
                warn!(%user_id, transaction_id = ?event.event_data.transaction_id, "Payment failed");
                self.repository
                    .record_payment(Self::payment(user_id, PaymentStatus::Failed, &event))
                    .await
                    .map(|_| WebhookAction::PaymentFailed)
            }
            WebhookEventKind::PaymentReversed => {
                let payment = Self::payment(user_id, PaymentStatus::Reversed, &event);
                self.repository
                    .reverse(user_id, payment)
                    .await
                    .map(|_| {
                        info!(%user_id, "Payment reversed, subscription expired");
                        WebhookAction::Reversed
                    })
            }
            WebhookEventKind::Other(_) => Ok(WebhookAction::Ignored),
        };

        match result {
            Ok(action) => Ok(WebhookOutcome {
                event_type_id,
                action,
            }),
            Err(SubscriptionRepositoryError::UserNotFound) => {
                warn!(%user_id, event_type_id, "Webhook for unknown user");
                Ok(ignored)
            }
            Err(SubscriptionRepositoryError::DatabaseError(msg)) => {
                Err(HandleWebhookError::RepositoryError(msg))
            }
        }
    }
}
