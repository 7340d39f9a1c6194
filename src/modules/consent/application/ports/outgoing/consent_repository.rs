use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::consent::application::domain::consent_state::ConsentState;

#[derive(Debug, Clone, PartialEq)]
pub struct NewConsentRecord {
    pub visitor_id: String,
    pub user_id: Option<UserId>,
    pub state: ConsentState,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsentRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Append-only audit trail of consent decisions.
#[async_trait]
pub trait ConsentRepository: Send + Sync {
    async fn record(&self, record: NewConsentRecord) -> Result<Uuid, ConsentRepositoryError>;
}
