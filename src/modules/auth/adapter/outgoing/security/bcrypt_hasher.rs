use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::auth::application::ports::outgoing::{HashError, PasswordHasher};

/// Verifies passwords carried over from accounts created before the
/// switch to Argon2. Still able to hash so it can stand alone in tests.
#[derive(Clone, Copy, Default)]
pub struct BcryptHasher {
    cost: Option<u32>,
}

impl BcryptHasher {
    pub fn with_cost(cost: u32) -> Self {
        Self { cost: Some(cost) }
    }

    pub fn is_bcrypt_hash(hash: &str) -> bool {
        hash.starts_with("$2a$") || hash.starts_with("$2b$") || hash.starts_with("$2y$")
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        let password = password.to_string();
        let cost = self.cost.unwrap_or(DEFAULT_COST);

        tokio::task::spawn_blocking(move || hash(password, cost).map_err(|_| HashError::HashFailed))
            .await
            .map_err(|_| HashError::TaskFailed)?
    }

    async fn verify_password(&self, password: &str, hashed: &str) -> Result<bool, HashError> {
        let password = password.to_string();
        let hashed = hashed.to_string();

        tokio::task::spawn_blocking(move || {
            verify(password, &hashed).map_err(|_| HashError::VerifyFailed)
        })
        .await
        .map_err(|_| HashError::TaskFailed)?
    }
}
