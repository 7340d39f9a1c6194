use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::application::domain::entities::UserId;

#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenBlacklistError {
    #[error("Token store error: {0}")]
    StoreError(String),

    #[error("Token already expired")]
    AlreadyExpired,
}

/// Revoked access tokens, keyed by the SHA-256 of the raw token.
#[async_trait]
pub trait TokenBlacklist: Send + Sync {
    async fn revoke(
        &self,
        token_hash: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenBlacklistError>;

    async fn is_revoked(&self, token_hash: &str) -> Result<bool, TokenBlacklistError>;
}
