use async_trait::async_trait;

use crate::billing::application::domain::entities::{CheckoutOrder, OrderRequest, RecurringCharge};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentGatewayError {
    #[error("Gateway is not configured")]
    NotConfigured,
    #[error("Gateway authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("Gateway request failed: {0}")]
    RequestFailed(String),
    #[error("Unexpected gateway response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens a hosted checkout order and returns where to send the customer.
    async fn create_order(&self, order: OrderRequest) -> Result<CheckoutOrder, PaymentGatewayError>;

    /// Revokes the card authorisation stored with `transaction_id` so no
    /// further recurring charge can be made.
    async fn cancel_recurring(&self, transaction_id: &str) -> Result<(), PaymentGatewayError>;

    /// Charges the stored card again. Returns the new transaction id, which
    /// carries the authorisation for the next renewal.
    async fn charge_recurring(&self, charge: RecurringCharge) -> Result<String, PaymentGatewayError>;
}
