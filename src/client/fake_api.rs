//! Scriptable [`DrugAlertApi`] for the client store tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use super::api::DrugAlertApi;
use super::error::ClientError;
use super::models::{AuthSession, ClientUser, FeedPage, FeedPost, PostsQuery, SignupForm};
use crate::auth::application::domain::entities::SubscriptionStatus;
use crate::notification::application::domain::entities::PushSubscription;

pub fn client_user(email: &str) -> ClientUser {
    ClientUser {
        id: "123e4567-e89b-12d3-a456-426614174000".into(),
        email: email.into(),
        full_name: Some("Μαρία Παπαδοπούλου".into()),
        phone_number: None,
        subscription_status: SubscriptionStatus::Trial,
        trial_end_date: Utc::now() + Duration::days(5),
        subscription_end_date: None,
        email_notifications: true,
        push_notifications: false,
        sms_notifications: false,
    }
}

pub fn feed_post(id: i32, title: &str, category_id: i32) -> FeedPost {
    FeedPost {
        id,
        title: title.into(),
        url: format!("https://www.eof.gr/post-{id}/"),
        content: Some(format!("Κείμενο ανακοίνωσης {id}")),
        excerpt: None,
        category_id: Some(category_id),
        category_name: None,
        publish_date: None,
        is_read: Some(false),
    }
}

pub fn unauthorized() -> ClientError {
    ClientError::Unauthorized("Token has expired".into())
}

pub fn api_error(status: u16, code: &str, message: &str) -> ClientError {
    ClientError::Api {
        status,
        code: code.into(),
        message: message.into(),
    }
}

pub struct FakeApi {
    pub session: Result<AuthSession, ClientError>,
    pub me: Result<ClientUser, ClientError>,
    pub logout: Result<(), ClientError>,
    pub vapid_key: Result<String, ClientError>,
    pub subscribe: Result<(), ClientError>,
    pub posts: Result<FeedPage, ClientError>,
    pub mark_read: Result<(), ClientError>,
    pub calls: Mutex<Vec<String>>,
    pub pushed: Mutex<Vec<PushSubscription>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            session: Ok(AuthSession {
                access_token: "issued-token".into(),
                token_type: Some("bearer".into()),
                user: client_user("maria@example.com"),
            }),
            me: Ok(client_user("maria@example.com")),
            logout: Ok(()),
            // 65 zero bytes, the size of an uncompressed P-256 point.
            vapid_key: Ok("A".repeat(87)),
            subscribe: Ok(()),
            posts: Ok(FeedPage {
                items: Vec::new(),
                total: 0,
                skip: 0,
                limit: 20,
            }),
            mark_read: Ok(()),
            calls: Mutex::new(Vec::new()),
            pushed: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DrugAlertApi for FakeApi {
    async fn login(&self, email: &str, _password: &str) -> Result<AuthSession, ClientError> {
        self.record(format!("login {email}"));
        self.session.clone()
    }

    async fn signup(&self, form: &SignupForm) -> Result<AuthSession, ClientError> {
        self.record(format!("signup {}", form.email));
        self.session.clone()
    }

    async fn logout(&self, token: &str) -> Result<(), ClientError> {
        self.record(format!("logout {token}"));
        self.logout.clone()
    }

    async fn me(&self, token: &str) -> Result<ClientUser, ClientError> {
        self.record(format!("me {token}"));
        self.me.clone()
    }

    async fn vapid_public_key(&self) -> Result<String, ClientError> {
        self.record("vapid".into());
        self.vapid_key.clone()
    }

    async fn subscribe_push(
        &self,
        token: &str,
        subscription: &PushSubscription,
    ) -> Result<(), ClientError> {
        self.record(format!("subscribe {token}"));
        self.pushed.lock().unwrap().push(subscription.clone());
        self.subscribe.clone()
    }

    async fn unsubscribe_push(&self, token: &str) -> Result<u64, ClientError> {
        self.record(format!("unsubscribe {token}"));
        Ok(1)
    }

    async fn list_posts(
        &self,
        _token: Option<&str>,
        _query: &PostsQuery,
    ) -> Result<FeedPage, ClientError> {
        self.record("posts".into());
        self.posts.clone()
    }

    async fn mark_read(&self, token: &str, post_id: i32) -> Result<(), ClientError> {
        self.record(format!("mark_read {post_id} {token}"));
        self.mark_read.clone()
    }
}
