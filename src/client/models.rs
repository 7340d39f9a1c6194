use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::application::domain::entities::{SubscriptionStatus, SubscriptionWindow};

/// Profile as returned by `/api/auth/me` and the login/signup endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub subscription_status: SubscriptionStatus,
    pub trial_end_date: DateTime<Utc>,
    #[serde(default)]
    pub subscription_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub email_notifications: bool,
    #[serde(default)]
    pub push_notifications: bool,
    #[serde(default)]
    pub sms_notifications: bool,
}

impl ClientUser {
    pub fn subscription_window(&self) -> SubscriptionWindow {
        SubscriptionWindow {
            status: self.subscription_status,
            trial_end: self.trial_end_date,
            subscription_end: self.subscription_end_date,
        }
    }

    /// Same rule the server applies, evaluated against the cached profile.
    pub fn has_premium_access(&self, now: DateTime<Utc>) -> bool {
        self.subscription_window().has_premium_access(now)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: ClientUser,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedPost {
    pub id: i32,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub publish_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedPage {
    pub items: Vec<FeedPost>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// Query string of `GET /api/posts`. Unset fields are left to server defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostsQuery {
    pub category_id: Option<i32>,
    pub search: Option<String>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl PostsQuery {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.category_id {
            pairs.push(("category_id", id.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            pairs.push(("search", search.trim().to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user_json(status: &str, trial_end: DateTime<Utc>) -> serde_json::Value {
        serde_json::json!({
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "email": "maria@example.com",
            "full_name": null,
            "subscription_status": status,
            "trial_end_date": trial_end,
            "subscription_end_date": null,
            "has_premium_access": true,
            "email_notifications": true,
            "push_notifications": false,
            "sms_notifications": false,
            "sms_credits": 0.0,
            "invoice_type": "receipt"
        })
    }

    #[test]
    fn profile_ignores_fields_the_client_does_not_use() {
        let user: ClientUser =
            serde_json::from_value(user_json("trial", Utc::now() + Duration::days(3))).unwrap();
        assert_eq!(user.email, "maria@example.com");
        assert_eq!(user.subscription_status, SubscriptionStatus::Trial);
    }

    #[test]
    fn premium_access_follows_trial_end() {
        let now = Utc::now();
        let user: ClientUser =
            serde_json::from_value(user_json("trial", now + Duration::days(1))).unwrap();

        assert!(user.has_premium_access(now));
        assert!(!user.has_premium_access(now + Duration::days(2)));
    }

    #[test]
    fn expired_user_has_no_premium_access() {
        let now = Utc::now();
        let user: ClientUser =
            serde_json::from_value(user_json("expired", now + Duration::days(1))).unwrap();
        assert!(!user.has_premium_access(now));
    }

    #[test]
    fn blank_search_is_not_sent() {
        let query = PostsQuery {
            category_id: Some(4),
            search: Some("   ".into()),
            limit: Some(20),
            ..Default::default()
        };
        assert_eq!(
            query.pairs(),
            vec![("category_id", "4".to_string()), ("limit", "20".to_string())]
        );
    }
}
