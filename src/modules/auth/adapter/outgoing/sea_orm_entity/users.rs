use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::auth::application::domain::entities::{
    BillingDetails, InvoiceType, NotificationPreferences, SubscriptionStatus,
    UnknownSubscriptionStatus, UserAccount,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub subscription_status: String,
    pub trial_start_date: DateTimeWithTimeZone,
    pub trial_end_date: DateTimeWithTimeZone,
    pub subscription_start_date: Option<DateTimeWithTimeZone>,
    pub subscription_end_date: Option<DateTimeWithTimeZone>,
    pub viva_transaction_id: Option<String>,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub sms_notifications: bool,
    #[sea_orm(column_type = "Double")]
    pub sms_credits: f64,
    pub company_name: Option<String>,
    pub tax_id: Option<String>,
    pub tax_office: Option<String>,
    pub billing_address: Option<String>,
    pub billing_city: Option<String>,
    pub billing_postal_code: Option<String>,
    pub invoice_type: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub last_login: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        #[cfg(feature = "no_db_triggers")]
        {
            use chrono::Utc;
            use sea_orm::ActiveValue::Set;

            if !_insert {
                self.updated_at = Set(Utc::now().into());
            }
        }

        Ok(self)
    }
}

impl Model {
    pub fn into_account(self) -> Result<UserAccount, UnknownSubscriptionStatus> {
        let subscription_status: SubscriptionStatus = self.subscription_status.parse()?;

        Ok(UserAccount {
            id: self.id.into(),
            email: self.email,
            full_name: self.full_name,
            phone_number: self.phone_number,
            subscription_status,
            trial_end_date: self.trial_end_date.to_utc(),
            subscription_end_date: self.subscription_end_date.map(|d| d.to_utc()),
            notifications: NotificationPreferences {
                email: self.email_notifications,
                push: self.push_notifications,
                sms: self.sms_notifications,
            },
            sms_credits: self.sms_credits,
            billing: BillingDetails {
                company_name: self.company_name,
                tax_id: self.tax_id,
                tax_office: self.tax_office,
                billing_address: self.billing_address,
                billing_city: self.billing_city,
                billing_postal_code: self.billing_postal_code,
                invoice_type: InvoiceType::from_db(&self.invoice_type),
            },
            created_at: self.created_at.to_utc(),
            last_login: self.last_login.map(|d| d.to_utc()),
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_model(id: Uuid) -> Model {
    let now = chrono::Utc::now();
    Model {
        id,
        email: "user@example.com".to_string(),
        password_hash: "$argon2id$v=19$m=4096,t=3,p=1$c2FsdA$aGFzaA".to_string(),
        full_name: Some("Μαρία Παπαδοπούλου".to_string()),
        phone_number: Some("+306912345678".to_string()),
        subscription_status: "trial".to_string(),
        trial_start_date: now.into(),
        trial_end_date: (now + chrono::Duration::days(10)).into(),
        subscription_start_date: None,
        subscription_end_date: None,
        viva_transaction_id: None,
        email_notifications: true,
        push_notifications: true,
        sms_notifications: false,
        sms_credits: 0.0,
        company_name: None,
        tax_id: None,
        tax_office: None,
        billing_address: None,
        billing_city: None,
        billing_postal_code: None,
        invoice_type: "receipt".to_string(),
        created_at: now.into(),
        updated_at: now.into(),
        last_login: None,
    }
}
