use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::{SubscriptionStatus, UserAccount, UserId};

/// Annual plan, 49.00 EUR.
pub const ANNUAL_PRICE_CENTS: i64 = 4900;
pub const CURRENCY: &str = "EUR";
pub const SUBSCRIPTION_PERIOD_DAYS: i64 = 365;
pub const ANNUAL_PAYMENT_TYPE: &str = "annual_subscription";
pub const RENEWAL_PAYMENT_TYPE: &str = "subscription_renewal";
/// Active periods ending within this many days are charged again.
pub const RENEWAL_WINDOW_DAYS: i64 = 7;
/// A renewal attempt, paid or failed, blocks another for this many days.
pub const RENEWAL_RETRY_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Reversed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Reversed => "reversed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub user_id: UserId,
    pub amount_cents: i64,
    pub currency: String,
    pub payment_type: String,
    pub provider_order_code: Option<String>,
    pub provider_transaction_id: Option<String>,
    pub status: PaymentStatus,
}

impl NewPayment {
    pub fn annual(user_id: UserId, status: PaymentStatus) -> Self {
        Self {
            user_id,
            amount_cents: ANNUAL_PRICE_CENTS,
            currency: CURRENCY.to_string(),
            payment_type: ANNUAL_PAYMENT_TYPE.to_string(),
            provider_order_code: None,
            provider_transaction_id: None,
            status,
        }
    }
}

impl NewPayment {
    pub fn renewal(user_id: UserId, status: PaymentStatus, transaction_id: Option<String>) -> Self {
        Self {
            payment_type: RENEWAL_PAYMENT_TYPE.to_string(),
            provider_transaction_id: transaction_id,
            ..Self::annual(user_id, status)
        }
    }
}

/// Billing columns of a user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub status: SubscriptionStatus,
    pub subscription_start: Option<DateTime<Utc>>,
    pub subscription_end: Option<DateTime<Utc>>,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub user_id: UserId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub transaction_id: Option<String>,
    pub payment: NewPayment,
}

/// Active subscription close to its end, with a stored card authorisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewalCandidate {
    pub user_id: UserId,
    pub subscription_end: DateTime<Utc>,
    pub transaction_id: String,
}

/// A successful renewal charge, applied together with its payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renewal {
    pub user_id: UserId,
    pub ends_at: DateTime<Utc>,
    pub transaction_id: String,
    pub payment: NewPayment,
}

/// Charge against the card stored with `transaction_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringCharge {
    pub transaction_id: String,
    pub amount_cents: i64,
    pub merchant_reference: String,
    pub description: String,
}

/// Outcome of one renewal run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenewalRun {
    pub candidates: usize,
    pub renewed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// A paid year starts from the later of now and the end of the period
/// already paid for, so an early renewal loses nothing.
pub fn extended_end(current_end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    let from = current_end.filter(|end| *end > now).unwrap_or(now);
    from + Duration::days(SUBSCRIPTION_PERIOD_DAYS)
}

/// `USER_<uuid>_ANNUAL_<YYYYMMDD>`, echoed back by the gateway as `MerchantTrns`.
pub fn merchant_reference(user_id: UserId, at: DateTime<Utc>) -> String {
    format!("USER_{}_ANNUAL_{}", user_id, at.format("%Y%m%d"))
}

/// `RECURRING_USER_<uuid>_<YYYYMMDD>`. Not parsed by the webhook handler,
/// the renewal job applies the charge itself.
pub fn renewal_reference(user_id: UserId, at: DateTime<Utc>) -> String {
    format!("RECURRING_USER_{}_{}", user_id, at.format("%Y%m%d"))
}

pub fn user_from_merchant_reference(reference: &str) -> Option<UserId> {
    let mut parts = reference.trim().split('_');
    if parts.next()? != "USER" {
        return None;
    }
    parts.next()?.parse::<Uuid>().ok().map(UserId::from)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub amount_cents: i64,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub merchant_reference: String,
    pub description: String,
    pub allow_recurring: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CheckoutOrder {
    pub order_code: String,
    pub checkout_url: String,
    pub amount_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SubscriptionOverview {
    pub status: SubscriptionStatus,
    pub trial_ends_at: DateTime<Utc>,
    pub subscription_ends_at: Option<DateTime<Utc>>,
    pub has_premium_access: bool,
    pub price_cents: i64,
    pub currency: String,
}

impl SubscriptionOverview {
    pub fn for_account(account: &UserAccount, now: DateTime<Utc>) -> Self {
        Self {
            status: account.subscription_status,
            trial_ends_at: account.trial_end_date,
            subscription_ends_at: account.subscription_end_date,
            has_premium_access: account.has_premium_access(now),
            price_cents: ANNUAL_PRICE_CENTS,
            currency: CURRENCY.to_string(),
        }
    }
}

/// Result of one expiry sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExpirySweep {
    pub expired_users: u64,
    pub push_subscriptions_removed: u64,
}
