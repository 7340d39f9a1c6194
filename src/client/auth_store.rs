use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::api::DrugAlertApi;
use super::error::ClientError;
use super::models::{AuthSession, ClientUser, SignupForm};
use super::storage::{JsonFile, StorageError};

/// What survives a restart of the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: Option<ClientUser>,
}

pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>, StorageError>;
    fn save(&self, session: &StoredSession) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

pub struct FileTokenStorage {
    file: JsonFile<StoredSession>,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<StoredSession>, StorageError> {
        self.file.load()
    }

    fn save(&self, session: &StoredSession) -> Result<(), StorageError> {
        self.file.save(session)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.file.clear()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<ClientUser>,
    pub error: Option<String>,
}

/// Single owner of the client's session: token, cached profile and the
/// last error to show.
pub struct AuthStore<A, S>
where
    A: DrugAlertApi,
    S: TokenStorage,
{
    api: A,
    storage: S,
    state: AuthState,
}

impl<A, S> AuthStore<A, S>
where
    A: DrugAlertApi,
    S: TokenStorage,
{
    /// Restores whatever session the storage holds. Unreadable storage is
    /// cleared and the store starts signed out.
    pub fn new(api: A, storage: S) -> Self {
        let state = match storage.load() {
            Ok(Some(session)) => AuthState {
                token: Some(session.token),
                user: session.user,
                error: None,
            },
            Ok(None) => AuthState::default(),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable stored session");
                if let Err(e) = storage.clear() {
                    warn!(error = %e, "Failed to clear stored session");
                }
                AuthState::default()
            }
        };

        Self {
            api,
            storage,
            state,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn user(&self) -> Option<&ClientUser> {
        self.state.user.as_ref()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.token.is_some() && self.state.user.is_some()
    }

    pub fn has_premium_access(&self, now: DateTime<Utc>) -> bool {
        self.state
            .user
            .as_ref()
            .is_some_and(|user| user.has_premium_access(now))
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&ClientUser, ClientError> {
        let result = self.api.login(email, password).await;
        self.adopt_session(result)
    }

    pub async fn signup(&mut self, form: &SignupForm) -> Result<&ClientUser, ClientError> {
        let result = self.api.signup(form).await;
        self.adopt_session(result)
    }

    fn adopt_session(
        &mut self,
        result: Result<AuthSession, ClientError>,
    ) -> Result<&ClientUser, ClientError> {
        let session = match result {
            Ok(session) => session,
            Err(e) => {
                self.state.error = Some(e.user_message());
                return Err(e);
            }
        };

        info!(user_id = %session.user.id, "Signed in");
        self.state = AuthState {
            token: Some(session.access_token),
            user: Some(session.user),
            error: None,
        };
        self.persist();

        self.state
            .user
            .as_ref()
            .ok_or_else(|| ClientError::Decode("session without user".to_string()))
    }

    /// Forgets the session locally, then tells the server. The server call
    /// may fail; the local sign-out stands regardless.
    pub async fn logout(&mut self) {
        let token = self.state.token.take();
        self.state = AuthState::default();
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "Failed to clear stored session");
        }

        if let Some(token) = token {
            if let Err(e) = self.api.logout(&token).await {
                warn!(error = %e, "Server logout failed");
            }
        }
    }

    /// Refreshes the cached profile. Returns whether the client is still
    /// signed in; a rejected token signs it out, other failures leave the
    /// session as it was.
    pub async fn check_auth(&mut self) -> Result<bool, ClientError> {
        let Some(token) = self.state.token.clone() else {
            return Ok(false);
        };

        match self.api.me(&token).await {
            Ok(user) => {
                self.state.user = Some(user);
                self.state.error = None;
                self.persist();
                Ok(true)
            }
            Err(e) if e.is_unauthorized() => {
                info!("Stored token rejected, signing out");
                self.state = AuthState::default();
                if let Err(e) = self.storage.clear() {
                    warn!(error = %e, "Failed to clear stored session");
                }
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn persist(&self) {
        let Some(token) = self.state.token.clone() else {
            return;
        };
        let session = StoredSession {
            token,
            user: self.state.user.clone(),
        };
        if let Err(e) = self.storage.save(&session) {
            warn!(error = %e, "Failed to persist session");
        }
    }
}
