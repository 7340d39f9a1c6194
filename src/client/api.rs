use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ClientError;
use super::models::{AuthSession, ClientUser, FeedPage, PostsQuery, SignupForm};
use crate::notification::application::domain::entities::PushSubscription;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The server endpoints the client-side stores talk to.
#[async_trait]
pub trait DrugAlertApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ClientError>;

    async fn signup(&self, form: &SignupForm) -> Result<AuthSession, ClientError>;

    async fn logout(&self, token: &str) -> Result<(), ClientError>;

    async fn me(&self, token: &str) -> Result<ClientUser, ClientError>;

    async fn vapid_public_key(&self) -> Result<String, ClientError>;

    async fn subscribe_push(
        &self,
        token: &str,
        subscription: &PushSubscription,
    ) -> Result<(), ClientError>;

    /// Returns how many stored subscriptions the server removed.
    async fn unsubscribe_push(&self, token: &str) -> Result<u64, ClientError>;

    async fn list_posts(
        &self,
        token: Option<&str>,
        query: &PostsQuery,
    ) -> Result<FeedPage, ClientError>;

    async fn mark_read(&self, token: &str, post_id: i32) -> Result<(), ClientError>;
}

#[derive(Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<EnvelopeError>,
}

#[derive(Deserialize)]
struct EnvelopeError {
    code: String,
    message: String,
}

/// Maps a `{success, data, error}` body to the payload or a [`ClientError`].
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    body: &[u8],
) -> Result<T, ClientError> {
    let envelope: Envelope<T> = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            return Err(match status {
                401 => ClientError::Unauthorized("Unauthorized".to_string()),
                200..=299 => ClientError::Decode(e.to_string()),
                _ => ClientError::Api {
                    status,
                    code: "HTTP_ERROR".to_string(),
                    message: format!("Request failed with status {status}"),
                },
            })
        }
    };

    if envelope.success && (200..300).contains(&status) {
        return envelope
            .data
            .ok_or_else(|| ClientError::Decode("response carried no data".to_string()));
    }

    let (code, message) = envelope
        .error
        .map(|e| (e.code, e.message))
        .unwrap_or_else(|| ("HTTP_ERROR".to_string(), format!("Request failed with status {status}")));

    if status == 401 {
        return Err(ClientError::Unauthorized(message));
    }

    Err(ClientError::Api {
        status,
        code,
        message,
    })
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SubscribeBody<'a> {
    subscription: &'a PushSubscription,
}

#[derive(Deserialize)]
struct VapidKeyBody {
    public_key: String,
}

#[derive(Deserialize)]
struct UnsubscribeBody {
    removed: u64,
}

/// reqwest-backed client of the `/api` surface.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Self::with_http(http, base_url)
    }

    pub fn with_http(http: Client, base_url: &str) -> Result<Self, ClientError> {
        // A trailing slash keeps any path prefix when joining endpoints.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| ClientError::Transport(format!("invalid base URL: {e}")))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Transport(format!("invalid endpoint {path}: {e}")))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status: StatusCode = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        debug!(status = status.as_u16(), bytes = body.len(), "API response");
        decode_envelope(status.as_u16(), &body)
    }
}

#[async_trait]
impl DrugAlertApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ClientError> {
        let url = self.endpoint("/api/auth/login")?;
        let request = self.http.post(url).json(&LoginBody { email, password });
        self.send(request, None).await
    }

    async fn signup(&self, form: &SignupForm) -> Result<AuthSession, ClientError> {
        let url = self.endpoint("/api/auth/signup")?;
        self.send(self.http.post(url).json(form), None).await
    }

    async fn logout(&self, token: &str) -> Result<(), ClientError> {
        let url = self.endpoint("/api/auth/logout")?;
        let _: IgnoredAny = self.send(self.http.post(url), Some(token)).await?;
        Ok(())
    }

    async fn me(&self, token: &str) -> Result<ClientUser, ClientError> {
        let url = self.endpoint("/api/auth/me")?;
        self.send(self.http.get(url), Some(token)).await
    }

    async fn vapid_public_key(&self) -> Result<String, ClientError> {
        let url = self.endpoint("/api/push/vapid-public-key")?;
        let body: VapidKeyBody = self.send(self.http.get(url), None).await?;
        Ok(body.public_key)
    }

    async fn subscribe_push(
        &self,
        token: &str,
        subscription: &PushSubscription,
    ) -> Result<(), ClientError> {
        let url = self.endpoint("/api/auth/push-subscription")?;
        let request = self.http.post(url).json(&SubscribeBody { subscription });
        let _: IgnoredAny = self.send(request, Some(token)).await?;
        Ok(())
    }

    async fn unsubscribe_push(&self, token: &str) -> Result<u64, ClientError> {
        let url = self.endpoint("/api/auth/push-subscription")?;
        let body: UnsubscribeBody = self.send(self.http.delete(url), Some(token)).await?;
        Ok(body.removed)
    }

    async fn list_posts(
        &self,
        token: Option<&str>,
        query: &PostsQuery,
    ) -> Result<FeedPage, ClientError> {
        let mut url = self.endpoint("/api/posts")?;
        let pairs = query.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        self.send(self.http.get(url), token).await
    }

    async fn mark_read(&self, token: &str, post_id: i32) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/auth/posts/{post_id}/mark-read"))?;
        let _: IgnoredAny = self.send(self.http.post(url), Some(token)).await?;
        Ok(())
    }
}
