use async_trait::async_trait;

use super::{Argon2Hasher, BcryptHasher};
use crate::auth::application::ports::outgoing::{HashError, PasswordHasher};

/// Hashes with Argon2 and verifies either Argon2 or legacy bcrypt hashes,
/// chosen by the stored hash prefix.
#[derive(Clone, Default)]
pub struct LegacyAwareHasher {
    argon2: Argon2Hasher,
    bcrypt: BcryptHasher,
}

impl LegacyAwareHasher {
    pub fn new(argon2: Argon2Hasher) -> Self {
        Self {
            argon2,
            bcrypt: BcryptHasher::default(),
        }
    }
}

#[async_trait]
impl PasswordHasher for LegacyAwareHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        self.argon2.hash_password(password).await
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        if BcryptHasher::is_bcrypt_hash(hash) {
            return self.bcrypt.verify_password(password, hash).await;
        }
        self.argon2.verify_password(password, hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_hashes_are_argon2() {
        let hasher = LegacyAwareHasher::default();
        let hashed = hasher.hash_password("password123").await.unwrap();

        assert!(hashed.starts_with("$argon2id$"));
        assert!(hasher.verify_password("password123", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn legacy_bcrypt_hashes_still_verify() {
        let legacy = BcryptHasher::with_cost(4)
            .hash_password("password123")
            .await
            .unwrap();
        let hasher = LegacyAwareHasher::default();

        assert!(hasher.verify_password("password123", &legacy).await.unwrap());
        assert!(!hasher.verify_password("password124", &legacy).await.unwrap());
    }
}
