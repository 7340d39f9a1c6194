use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::auth::application::{
    domain::entities::{NotificationPreferences, UserAccount, UserId},
    ports::outgoing::{UserQuery, UserRepository, UserRepositoryError},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdatePreferencesError {
    #[error("Push and SMS notifications require an active trial or subscription")]
    PremiumRequired,
    #[error("User not found")]
    UserNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait IUpdateNotificationPreferencesUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: UserId,
        preferences: NotificationPreferences,
    ) -> Result<UserAccount, UpdatePreferencesError>;
}

#[derive(Clone)]
pub struct UpdateNotificationPreferencesUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
}

impl<Q, R> UpdateNotificationPreferencesUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> IUpdateNotificationPreferencesUseCase for UpdateNotificationPreferencesUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        user_id: UserId,
        preferences: NotificationPreferences,
    ) -> Result<UserAccount, UpdatePreferencesError> {
        let account = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| UpdatePreferencesError::RepositoryError(e.to_string()))?
            .ok_or(UpdatePreferencesError::UserNotFound)?;

        // Turning premium channels off is always allowed.
        let enables_premium = (preferences.push && !account.notifications.push)
            || (preferences.sms && !account.notifications.sms);
        if enables_premium && !account.has_premium_access(Utc::now()) {
            return Err(UpdatePreferencesError::PremiumRequired);
        }

        let updated = self
            .repository
            .update_notification_preferences(user_id, preferences)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => UpdatePreferencesError::UserNotFound,
                other => UpdatePreferencesError::RepositoryError(other.to_string()),
            })?;

        info!(
            %user_id,
            email = preferences.email,
            push = preferences.push,
            sms = preferences.sms,
            "Notification preferences updated"
        );

        Ok(updated)
    }
}
