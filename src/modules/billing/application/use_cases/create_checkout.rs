use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::auth::application::domain::entities::{SubscriptionStatus, UserId};
use crate::auth::application::use_cases::get_current_user::{
    GetCurrentUserError, IGetCurrentUserUseCase,
};
use crate::billing::application::{
    domain::entities::{
        merchant_reference, CheckoutOrder, NewPayment, OrderRequest, PaymentStatus,
        ANNUAL_PRICE_CENTS,
    },
    ports::outgoing::{PaymentGateway, SubscriptionRepository},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateCheckoutError {
    #[error("You already have an active subscription")]
    AlreadySubscribed,
    #[error("User not found")]
    UserNotFound,
    #[error("Query error: {0}")]
    QueryError(String),
    #[error("Payment provider error: {0}")]
    GatewayError(String),
}

#[async_trait]
pub trait ICreateCheckoutUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<CheckoutOrder, CreateCheckoutError>;
}

pub struct CreateCheckoutUseCase<G, R>
where
    G: PaymentGateway + Send + Sync,
    R: SubscriptionRepository + Send + Sync,
{
    current_user: Arc<dyn IGetCurrentUserUseCase + Send + Sync>,
    gateway: G,
    repository: R,
}

impl<G, R> CreateCheckoutUseCase<G, R>
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
impl<G, R> ICreateCheckoutUseCase for CreateCheckoutUseCase<G, R>
where
    G: PaymentGateway + Send + Sync,
    R: SubscriptionRepository + Send + Sync,
{
    async fn execute(&self, user_id: UserId) -> Result<CheckoutOrder, CreateCheckoutError> {
        let account = self
            .current_user
            .execute(user_id)
            .await
            .map_err(|e| match e {
                GetCurrentUserError::UserNotFound => CreateCheckoutError::UserNotFound,
                GetCurrentUserError::QueryError(msg) => CreateCheckoutError::QueryError(msg),
            })?;

        if account.subscription_status == SubscriptionStatus::Active {
            return Err(CreateCheckoutError::AlreadySubscribed);
        }

        let request = OrderRequest {
            amount_cents: ANNUAL_PRICE_CENTS,
            customer_email: account.email.clone(),
            customer_name: account.full_name.clone(),
            merchant_reference: merchant_reference(user_id, Utc::now()),
            description: format!("DrugAlert.gr annual subscription for {}", account.email),
            allow_recurring: true,
        };

        let order = self
            .gateway
            .create_order(request)
            .await
            .map_err(|e| CreateCheckoutError::GatewayError(e.to_string()))?;

        // The webhook is the source of truth; the pending row is only an audit trail.
        let mut pending = NewPayment::annual(user_id, PaymentStatus::Pending);
        pending.provider_order_code = Some(order.order_code.clone());
        if let Err(e) = self.repository.record_payment(pending).await {
            warn!(%user_id, order_code = %order.order_code, error = %e, "Failed to record pending payment");
        }

        info!(%user_id, order_code = %order.order_code, "Checkout order created");
        Ok(order)
    }
}
