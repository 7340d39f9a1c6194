use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VivaEnvironment {
    #[default]
    Demo,
    Production,
}

impl VivaEnvironment {
    /// Anything other than `production` talks to the demo environment.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" | "live" => VivaEnvironment::Production,
            _ => VivaEnvironment::Demo,
        }
    }

    pub fn accounts_url(&self) -> &'static str {
        match self {
            VivaEnvironment::Demo => "https://demo-accounts.vivapayments.com",
            VivaEnvironment::Production => "https://accounts.vivapayments.com",
        }
    }

    pub fn api_url(&self) -> &'static str {
        match self {
            VivaEnvironment::Demo => "https://demo-api.vivapayments.com",
            VivaEnvironment::Production => "https://api.vivapayments.com",
        }
    }

    pub fn checkout_url(&self) -> &'static str {
        match self {
            VivaEnvironment::Demo => "https://demo.vivapayments.com/web/checkout",
            VivaEnvironment::Production => "https://www.vivapayments.com/web/checkout",
        }
    }
}

#[derive(Clone)]
pub struct VivaConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub source_code: String,
    pub webhook_verification_key: Option<String>,
    pub environment: VivaEnvironment,
    pub timeout: Duration,
}

impl std::fmt::Debug for VivaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VivaConfig")
            .field("client_id", &self.client_id)
            .field("source_code", &self.source_code)
            .field("environment", &self.environment)
            .finish()
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl VivaConfig {
    /// Missing credentials leave the gateway disabled rather than stopping
    /// the server; checkout then answers with a provider error.
    pub fn from_env() -> Self {
        Self {
            client_id: non_empty("VIVA_CLIENT_ID"),
            client_secret: non_empty("VIVA_CLIENT_SECRET"),
            source_code: non_empty("VIVA_SOURCE_CODE").unwrap_or_else(|| "Default".to_string()),
            webhook_verification_key: non_empty("VIVA_WEBHOOK_VERIFICATION_KEY"),
            environment: env::var("VIVA_ENVIRONMENT")
                .map(|v| VivaEnvironment::parse(&v))
                .unwrap_or_default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.client_id.as_deref()?, self.client_secret.as_deref()?))
    }
}
