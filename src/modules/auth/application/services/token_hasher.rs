use sha2::{Digest, Sha256};

/// Hex SHA-256 of a bearer token. Raw tokens never leave the process.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
