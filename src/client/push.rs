use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::api::DrugAlertApi;
use super::error::ClientError;
use crate::notification::application::domain::entities::PushSubscription;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushPermission {
    Granted,
    Denied,
    /// The user dismissed the prompt without choosing.
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PushError {
    #[error("Push notifications are not supported on this platform")]
    Unsupported,
    #[error("Notification permission was not granted")]
    PermissionDenied,
    #[error("Service worker registration failed: {0}")]
    Registration(String),
    #[error("Push subscription failed: {0}")]
    Subscription(String),
    #[error("Invalid VAPID public key: {0}")]
    InvalidVapidKey(String),
    #[error(transparent)]
    Api(#[from] ClientError),
}

/// The browser-side push machinery: service worker, permission prompt and
/// the push manager's subscription.
#[async_trait]
pub trait PushPlatform: Send + Sync {
    fn is_supported(&self) -> bool;

    async fn register_service_worker(&self) -> Result<(), PushError>;

    async fn request_permission(&self) -> Result<PushPermission, PushError>;

    async fn existing_subscription(&self) -> Result<Option<PushSubscription>, PushError>;

    async fn subscribe(&self, application_server_key: &[u8]) -> Result<PushSubscription, PushError>;

    /// Returns whether a subscription existed.
    async fn unsubscribe(&self) -> Result<bool, PushError>;
}

/// Accepts the key with or without padding, in either base64 alphabet.
pub fn decode_vapid_key(key: &str) -> Result<Vec<u8>, PushError> {
    let normalized: String = key
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    if normalized.is_empty() {
        return Err(PushError::InvalidVapidKey("empty key".to_string()));
    }

    URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|e| PushError::InvalidVapidKey(e.to_string()))
}

pub struct PushNotificationService<A, P>
where
    A: DrugAlertApi,
    P: PushPlatform,
{
    api: A,
    platform: P,
    registered: OnceCell<()>,
}

impl<A, P> PushNotificationService<A, P>
where
    A: DrugAlertApi,
    P: PushPlatform,
{
    pub fn new(api: A, platform: P) -> Self {
        Self {
            api,
            platform,
            registered: OnceCell::new(),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Registers the service worker once; later calls are no-ops.
    pub async fn init(&self) -> Result<(), PushError> {
        if !self.platform.is_supported() {
            return Err(PushError::Unsupported);
        }

        self.registered
            .get_or_try_init(|| async {
                self.platform.register_service_worker().await?;
                info!("Service worker registered");
                Ok::<(), PushError>(())
            })
            .await?;
        Ok(())
    }

    pub async fn subscribe_to_push(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<PushSubscription, PushError> {
        self.init().await?;

        let permission = self.platform.request_permission().await?;
        if permission != PushPermission::Granted {
            warn!(%user_id, ?permission, "Push permission not granted");
            return Err(PushError::PermissionDenied);
        }

        let subscription = match self.platform.existing_subscription().await? {
            Some(existing) => existing,
            None => {
                let key = decode_vapid_key(&self.api.vapid_public_key().await?)?;
                self.platform.subscribe(&key).await?
            }
        };

        self.api.subscribe_push(token, &subscription).await?;
        info!(%user_id, endpoint = %subscription.endpoint, "Push subscription sent to server");

        Ok(subscription)
    }

    pub async fn unsubscribe_from_push(&self, token: &str) -> Result<(), PushError> {
        self.init().await?;

        let existed = self.platform.unsubscribe().await?;
        let removed = self.api.unsubscribe_push(token).await?;
        info!(existed, removed, "Push subscription removed");

        Ok(())
    }
}
