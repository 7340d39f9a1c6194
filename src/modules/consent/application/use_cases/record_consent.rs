use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::consent::application::{
    domain::consent_state::ConsentState,
    ports::outgoing::{ConsentRepository, NewConsentRecord},
};

pub const MAX_VISITOR_ID_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct RecordConsentRequest {
    pub visitor_id: String,
    pub user_id: Option<UserId>,
    pub state: ConsentState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ConsentReceipt {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordConsentError {
    #[error("visitor_id must be 1 to 64 letters, digits, '-' or '_'")]
    InvalidVisitorId,
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

fn valid_visitor_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_VISITOR_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[async_trait]
pub trait IRecordConsentUseCase: Send + Sync {
    async fn execute(
        &self,
        request: RecordConsentRequest,
    ) -> Result<ConsentReceipt, RecordConsentError>;
}

#[derive(Clone)]
pub struct RecordConsentUseCase<R>
where
    R: ConsentRepository,
{
    repository: R,
}

impl<R> RecordConsentUseCase<R>
where
    R: ConsentRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IRecordConsentUseCase for RecordConsentUseCase<R>
where
    R: ConsentRepository,
{
    async fn execute(
        &self,
        request: RecordConsentRequest,
    ) -> Result<ConsentReceipt, RecordConsentError> {
        let visitor_id = request.visitor_id.trim().to_string();
        if !valid_visitor_id(&visitor_id) {
            return Err(RecordConsentError::InvalidVisitorId);
        }

        let recorded_at = Utc::now();
        let id = self
            .repository
            .record(NewConsentRecord {
                visitor_id: visitor_id.clone(),
                user_id: request.user_id,
                state: request.state,
                recorded_at,
            })
            .await
            .map_err(|e| RecordConsentError::RepositoryError(e.to_string()))?;

        info!(
            %visitor_id,
            signed_in = request.user_id.is_some(),
            analytics = ?request.state.analytics_storage,
            ads = ?request.state.ad_storage,
            "Consent recorded"
        );

        Ok(ConsentReceipt { id, recorded_at })
    }
}
