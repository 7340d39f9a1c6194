use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Length of the free trial granted at signup when `TRIAL_DAYS` is unset.
pub const DEFAULT_TRIAL_DAYS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<UserId> for Uuid {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Trial,
    Active,
    Expired,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Trial => "trial",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown subscription status: {0}")]
pub struct UnknownSubscriptionStatus(pub String);

impl FromStr for SubscriptionStatus {
    type Err = UnknownSubscriptionStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trial" => Ok(SubscriptionStatus::Trial),
            "active" => Ok(SubscriptionStatus::Active),
            "expired" => Ok(SubscriptionStatus::Expired),
            // "canceling" was written by an older billing flow
            "cancelled" | "canceled" | "canceling" => Ok(SubscriptionStatus::Cancelled),
            other => Err(UnknownSubscriptionStatus(other.to_string())),
        }
    }
}

/// The part of an account that decides premium access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionWindow {
    pub status: SubscriptionStatus,
    pub trial_end: DateTime<Utc>,
    pub subscription_end: Option<DateTime<Utc>>,
}

impl SubscriptionWindow {
    /// Premium features (push, SMS) are available while the trial or the
    /// paid period is running. A cancelled subscription keeps access until
    /// the end of the period already paid for.
    pub fn has_premium_access(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            SubscriptionStatus::Trial => now < self.trial_end,
            SubscriptionStatus::Active | SubscriptionStatus::Cancelled => {
                self.subscription_end.map_or(true, |end| now < end)
            }
            SubscriptionStatus::Expired => false,
        }
    }

    /// Status the account should be moved to because its period ran out.
    pub fn lapsed_status(&self, now: DateTime<Utc>) -> Option<SubscriptionStatus> {
        let lapsed = match self.status {
            SubscriptionStatus::Trial => now > self.trial_end,
            SubscriptionStatus::Active | SubscriptionStatus::Cancelled => {
                self.subscription_end.is_some_and(|end| now > end)
            }
            SubscriptionStatus::Expired => false,
        };

        lapsed.then_some(SubscriptionStatus::Expired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotificationPreferences {
    pub email: bool,
    pub push: bool,
    pub sms: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            sms: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceType {
    #[default]
    Receipt,
    Invoice,
}

impl InvoiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::Receipt => "receipt",
            InvoiceType::Invoice => "invoice",
        }
    }

    /// Unknown values fall back to a plain receipt.
    pub fn from_db(value: &str) -> Self {
        match value {
            "invoice" => InvoiceType::Invoice,
            _ => InvoiceType::Receipt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct BillingDetails {
    pub company_name: Option<String>,
    pub tax_id: Option<String>,
    pub tax_office: Option<String>,
    pub billing_address: Option<String>,
    pub billing_city: Option<String>,
    pub billing_postal_code: Option<String>,
    pub invoice_type: InvoiceType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub subscription_status: SubscriptionStatus,
    pub trial_end_date: DateTime<Utc>,
    pub subscription_end_date: Option<DateTime<Utc>>,
    pub notifications: NotificationPreferences,
    pub sms_credits: f64,
    pub billing: BillingDetails,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl UserAccount {
    pub fn subscription_window(&self) -> SubscriptionWindow {
        SubscriptionWindow {
            status: self.subscription_status,
            trial_end: self.trial_end_date,
            subscription_end: self.subscription_end_date,
        }
    }

    pub fn has_premium_access(&self, now: DateTime<Utc>) -> bool {
        self.subscription_window().has_premium_access(now)
    }
}
