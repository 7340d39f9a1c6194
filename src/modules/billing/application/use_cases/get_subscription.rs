use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::use_cases::get_current_user::{
    GetCurrentUserError, IGetCurrentUserUseCase,
};
use crate::billing::application::domain::entities::SubscriptionOverview;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GetSubscriptionError {
    #[error("User not found")]
    UserNotFound,
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait IGetSubscriptionUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<SubscriptionOverview, GetSubscriptionError>;
}

#[derive(Clone)]
pub struct GetSubscriptionUseCase {
    current_user: Arc<dyn IGetCurrentUserUseCase + Send + Sync>,
}

impl GetSubscriptionUseCase {
    pub fn new(current_user: Arc<dyn IGetCurrentUserUseCase + Send + Sync>) -> Self {
        Self { current_user }
    }
}

#[async_trait]
impl IGetSubscriptionUseCase for GetSubscriptionUseCase {
    async fn execute(&self, user_id: UserId) -> Result<SubscriptionOverview, GetSubscriptionError> {
        let account = self
            .current_user
            .execute(user_id)
            .await
            .map_err(|e| match e {
                GetCurrentUserError::UserNotFound => GetSubscriptionError::UserNotFound,
                GetCurrentUserError::QueryError(msg) => GetSubscriptionError::QueryError(msg),
            })?;

        Ok(SubscriptionOverview::for_account(&account, Utc::now()))
    }
}
