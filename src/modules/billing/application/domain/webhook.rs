use serde::Deserialize;
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

pub const EVENT_PAYMENT_CREATED: i64 = 1796;
pub const EVENT_PAYMENT_FAILED: i64 = 1798;
pub const EVENT_PAYMENT_REVERSED: i64 = 1799;

/// Notification body posted by Viva. Field names are PascalCase on the wire;
/// camelCase is accepted as well.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct WebhookEvent {
    #[serde(rename = "EventTypeId", alias = "eventTypeId")]
    pub event_type_id: i64,
    #[serde(rename = "EventData", alias = "eventData", default)]
    pub event_data: WebhookEventData,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct WebhookEventData {
    #[serde(rename = "TransactionId", alias = "transactionId", default)]
    pub transaction_id: Option<String>,
    #[serde(rename = "OrderCode", alias = "orderCode", default)]
    pub order_code: Option<u64>,
    /// Euros, e.g. `49.0`.
    #[serde(rename = "Amount", alias = "amount", default)]
    pub amount: Option<f64>,
    #[serde(rename = "MerchantTrns", alias = "merchantTrns", default)]
    pub merchant_trns: Option<String>,
}

impl WebhookEventData {
    pub fn amount_cents(&self) -> Option<i64> {
        self.amount
            .filter(|a| a.is_finite() && *a >= 0.0)
            .map(|a| (a * 100.0).round() as i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookEventKind {
    PaymentCreated,
    PaymentFailed,
    PaymentReversed,
    Other(i64),
}

impl From<i64> for WebhookEventKind {
    fn from(value: i64) -> Self {
        match value {
            EVENT_PAYMENT_CREATED => WebhookEventKind::PaymentCreated,
            EVENT_PAYMENT_FAILED => WebhookEventKind::PaymentFailed,
            EVENT_PAYMENT_REVERSED => WebhookEventKind::PaymentReversed,
            other => WebhookEventKind::Other(other),
        }
    }
}

/// Compares the presented key with the configured one without leaking
/// the position of the first mismatch. Both sides are hashed first so
/// the comparison runs over equal lengths.
pub fn webhook_keys_match(expected: &str, presented: &str) -> bool {
    let a = Sha256::digest(expected.as_bytes());
    let b = Sha256::digest(presented.as_bytes());

    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
