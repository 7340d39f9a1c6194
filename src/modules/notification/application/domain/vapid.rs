use std::env;

/// Public half of the VAPID key pair, handed to browsers as the
/// `applicationServerKey`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VapidConfig {
    pub public_key: Option<String>,
}

impl VapidConfig {
    pub fn from_env() -> Self {
        Self {
            public_key: env::var("VAPID_PUBLIC_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
        }
    }
}
