use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Keys of a Web Push subscription, base64url as the browser reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PushSubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// Browser `PushSubscription` JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PushSubscription {
    #[schema(example = "https://fcm.googleapis.com/fcm/send/abc123")]
    pub endpoint: String,
    pub keys: PushSubscriptionKeys,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSubscription {
    #[error("endpoint must be an https URL")]
    Endpoint,
    #[error("subscription keys must not be empty")]
    Keys,
}

impl PushSubscription {
    pub fn validate(&self) -> Result<(), InvalidSubscription> {
        if !self.endpoint.starts_with("https://") || self.endpoint.len() <= "https://".len() {
            return Err(InvalidSubscription::Endpoint);
        }
        if self.keys.p256dh.trim().is_empty() || self.keys.auth.trim().is_empty() {
            return Err(InvalidSubscription::Keys);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Email,
    Push,
    Sms,
}

impl NotificationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationChannel::Email => "email",
            NotificationChannel::Push => "push",
            NotificationChannel::Sms => "sms",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "email" => Some(NotificationChannel::Email),
            "push" => Some(NotificationChannel::Push),
            "sms" => Some(NotificationChannel::Sms),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NotificationLogEntry {
    pub id: i32,
    pub post_id: Option<i32>,
    pub notification_type: NotificationChannel,
    #[schema(example = "sent")]
    pub status: String,
    pub message: Option<String>,
    pub cost: f64,
    pub sent_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(endpoint: &str, p256dh: &str) -> PushSubscription {
        PushSubscription {
            endpoint: endpoint.to_string(),
            keys: PushSubscriptionKeys {
                p256dh: p256dh.to_string(),
                auth: "auth-secret".to_string(),
            },
        }
    }

    #[test]
    fn browser_subscription_json_parses() {
        let sub: PushSubscription = serde_json::from_value(serde_json::json!({
            "endpoint": "https://updates.push.services.mozilla.com/wpush/v2/xyz",
            "expirationTime": null,
            "keys": { "p256dh": "BNc...", "auth": "tBH..." }
        }))
        .unwrap();
        assert!(sub.validate().is_ok());
    }

    #[test]
    fn plain_http_endpoint_is_rejected() {
        let err = subscription("http://push.example.com/1", "key").validate().unwrap_err();
        assert_eq!(err, InvalidSubscription::Endpoint);
    }

    #[test]
    fn empty_keys_are_rejected() {
        let err = subscription("https://push.example.com/1", " ").validate().unwrap_err();
        assert_eq!(err, InvalidSubscription::Keys);
    }
}
