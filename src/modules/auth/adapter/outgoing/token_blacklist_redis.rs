use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::{TokenBlacklist, TokenBlacklistError};

/// Revoked access tokens in Redis.
///
/// ```text
/// auth:revoked:{token_hash} -> "{user_id}"   TTL = seconds until token exp
/// ```
///
/// A key outliving its token would be harmless, so Redis expiry is the only
/// cleanup there is.
#[derive(Clone)]
pub struct RedisTokenBlacklist {
    pool: Arc<Pool>,
}

impl RedisTokenBlacklist {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    fn token_key(token_hash: &str) -> String {
        format!("auth:revoked:{token_hash}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, TokenBlacklistError> {
        self.pool
            .get()
            .await
            .map_err(|e| TokenBlacklistError::StoreError(format!("Pool error: {}", e)))
    }
}

pub(crate) fn ttl_seconds(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<u64> {
    let ttl = (expires_at - now).num_seconds();
    (ttl > 0).then_some(ttl as u64)
}

#[async_trait]
impl TokenBlacklist for RedisTokenBlacklist {
    async fn revoke(
        &self,
        token_hash: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenBlacklistError> {
        let ttl = ttl_seconds(expires_at, Utc::now()).ok_or(TokenBlacklistError::AlreadyExpired)?;

        let mut conn = self.get_conn().await?;
        conn.set_ex::<_, _, ()>(Self::token_key(token_hash), user_id.to_string(), ttl)
            .await
            .map_err(|e| TokenBlacklistError::StoreError(e.to_string()))?;

        Ok(())
    }

    async fn is_revoked(&self, token_hash: &str) -> Result<bool, TokenBlacklistError> {
        let mut conn = self.get_conn().await?;

        conn.exists(Self::token_key(token_hash))
            .await
            .map_err(|e| TokenBlacklistError::StoreError(e.to_string()))
    }
}
