use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::application::domain::entities::{
    InvoiceType, NotificationPreferences, UserAccount, UserId,
};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub trial_end_date: DateTime<Utc>,
}

/// Partial profile update. `None` leaves a column untouched,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub full_name: Option<Option<String>>,
    pub phone_number: Option<Option<String>>,
    pub company_name: Option<Option<String>>,
    pub tax_id: Option<Option<String>>,
    pub tax_office: Option<Option<String>>,
    pub billing_address: Option<Option<String>>,
    pub billing_city: Option<Option<String>>,
    pub billing_postal_code: Option<Option<String>>,
    pub invoice_type: Option<InvoiceType>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        *self == ProfileChanges::default()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<UserAccount, UserRepositoryError>;

    async fn record_login(&self, user_id: UserId, at: DateTime<Utc>)
        -> Result<(), UserRepositoryError>;

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<UserAccount, UserRepositoryError>;

    async fn update_notification_preferences(
        &self,
        user_id: UserId,
        preferences: NotificationPreferences,
    ) -> Result<UserAccount, UserRepositoryError>;

    /// Moves the account to `expired`, turns push off and drops its push
    /// subscriptions in one transaction. Returns the subscriptions removed.
    async fn expire_subscription(
        &self,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> Result<u64, UserRepositoryError>;
}
