use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::application::domain::entities::{InvoiceType, SubscriptionStatus, UserAccount};
use crate::auth::application::use_cases::login_user::AuthSession;

/// Account as shown to its owner.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfileResponse {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    #[schema(example = "maria@example.com")]
    pub email: String,
    pub full_name: Option<String>,
    #[schema(example = "+306912345678")]
    pub phone_number: Option<String>,
    pub subscription_status: SubscriptionStatus,
    pub trial_end_date: DateTime<Utc>,
    pub subscription_end_date: Option<DateTime<Utc>>,
    pub has_premium_access: bool,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub sms_notifications: bool,
    pub sms_credits: f64,
    pub company_name: Option<String>,
    pub tax_id: Option<String>,
    pub tax_office: Option<String>,
    pub billing_address: Option<String>,
    pub billing_city: Option<String>,
    pub billing_postal_code: Option<String>,
    pub invoice_type: InvoiceType,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<UserAccount> for UserProfileResponse {
    fn from(account: UserAccount) -> Self {
        let has_premium_access = account.has_premium_access(Utc::now());
        Self {
            id: account.id.to_string(),
            email: account.email,
            full_name: account.full_name,
            phone_number: account.phone_number,
            subscription_status: account.subscription_status,
            trial_end_date: account.trial_end_date,
            subscription_end_date: account.subscription_end_date,
            has_premium_access,
            email_notifications: account.notifications.email,
            push_notifications: account.notifications.push,
            sms_notifications: account.notifications.sms,
            sms_credits: account.sms_credits,
            company_name: account.billing.company_name,
            tax_id: account.billing.tax_id,
            tax_office: account.billing.tax_office,
            billing_address: account.billing.billing_address,
            billing_city: account.billing.billing_city,
            billing_postal_code: account.billing.billing_postal_code,
            invoice_type: account.billing.invoice_type,
            created_at: account.created_at,
            last_login: account.last_login,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthSessionResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    pub user: UserProfileResponse,
}

impl From<AuthSession> for AuthSessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.access_token,
            token_type: session.token_type,
            user: session.user.into(),
        }
    }
}
