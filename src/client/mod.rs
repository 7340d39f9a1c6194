//! Typed client of the DrugAlert.gr API and the client-side state built on
//! it: session, push registration, post feed and cookie consent.

mod api;
mod auth_store;
mod consent_manager;
mod error;
mod models;
mod post_feed;
mod push;
mod storage;

#[cfg(test)]
mod fake_api;

pub use api::{ApiClient, DrugAlertApi};
pub use auth_store::{AuthState, AuthStore, FileTokenStorage, StoredSession, TokenStorage};
pub use consent_manager::{
    ConsentManager, ConsentStorage, FileConsentStorage, StoredConsent, TagManager,
};
pub use error::ClientError;
pub use models::{AuthSession, ClientUser, FeedPage, FeedPost, PostsQuery, SignupForm};
pub use post_feed::PostFeed;
pub use push::{decode_vapid_key, PushError, PushNotificationService, PushPermission, PushPlatform};
pub use storage::{JsonFile, StorageError};
