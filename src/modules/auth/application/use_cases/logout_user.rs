use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::auth::application::{
    domain::entities::UserId,
    ports::outgoing::{TokenBlacklist, TokenBlacklistError, TokenProvider},
    services::hash_token,
};

#[derive(Debug, Clone)]
pub struct LogoutRequest {
    pub user_id: UserId,
    pub access_token: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LogoutError {
    #[error("Token revocation failed: {0}")]
    TokenRevocationFailed(String),
}

#[async_trait]
pub trait ILogoutUseCase: Send + Sync {
    async fn execute(&self, request: LogoutRequest) -> Result<(), LogoutError>;
}

#[derive(Clone)]
pub struct LogoutUseCase {
    blacklist: Arc<dyn TokenBlacklist>,
    token_provider: Arc<dyn TokenProvider>,
}

impl LogoutUseCase {
    pub fn new(blacklist: Arc<dyn TokenBlacklist>, token_provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            blacklist,
            token_provider,
        }
    }
}

#[async_trait]
impl ILogoutUseCase for LogoutUseCase {
    async fn execute(&self, request: LogoutRequest) -> Result<(), LogoutError> {
        let claims = match self.token_provider.verify_token(&request.access_token) {
            Ok(claims) => claims,
            Err(e) => {
                // Nothing to revoke; the client drops its copy anyway.
                warn!(user_id = %request.user_id, error = %e, "Logout with unverifiable token");
                return Ok(());
            }
        };

        let expires_at =
            DateTime::<Utc>::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);

        match self
            .blacklist
            .revoke(&hash_token(&request.access_token), request.user_id, expires_at)
            .await
        {
            Ok(()) | Err(TokenBlacklistError::AlreadyExpired) => {
                info!(user_id = %request.user_id, "Access token revoked");
                Ok(())
            }
            Err(TokenBlacklistError::StoreError(msg)) => {
                Err(LogoutError::TokenRevocationFailed(msg))
            }
        }
    }
}
