use async_trait::async_trait;

use crate::auth::application::domain::entities::{UserAccount, UserId};

/// Account plus the stored hash, only handed to the login flow.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub account: UserAccount,
    pub password_hash: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupted user row: {0}")]
    CorruptedRow(String),
}

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserQueryError>;

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserAccount>, UserQueryError>;
}
