use async_trait::async_trait;
use tracing::info;

use crate::auth::application::{
    domain::{
        entities::UserId,
        saved_search::{NewSavedSearch, SAVED_SEARCH_NAME_MAX_LEN},
    },
    ports::outgoing::{SavedSearchRepository, SavedSearchRepositoryError},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateSavedSearchError {
    #[error("Search name must be between 1 and 255 characters")]
    InvalidName,
    #[error("Category not found")]
    CategoryNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ICreateSavedSearchUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId, search: NewSavedSearch) -> Result<i32, CreateSavedSearchError>;
}

#[derive(Clone)]
pub struct CreateSavedSearchUseCase<R>
where
    R: SavedSearchRepository + Send + Sync,
{
    repository: R,
}

impl<R> CreateSavedSearchUseCase<R>
where
    R: SavedSearchRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ICreateSavedSearchUseCase for CreateSavedSearchUseCase<R>
where
    R: SavedSearchRepository + Send + Sync,
{
    async fn execute(&self, user_id: UserId, search: NewSavedSearch) -> Result<i32, CreateSavedSearchError> {
        let search = search.normalized();
        let name_len = search.name.chars().count();
        if name_len == 0 || name_len > SAVED_SEARCH_NAME_MAX_LEN {
            return Err(CreateSavedSearchError::InvalidName);
        }

        let id = self
            .repository
            .create(user_id, search)
            .await
            .map_err(|e| match e {
                SavedSearchRepositoryError::CategoryNotFound => CreateSavedSearchError::CategoryNotFound,
                other => CreateSavedSearchError::RepositoryError(other.to_string()),
            })?;

        info!(%user_id, saved_search_id = id, "Saved search created");
        Ok(id)
    }
}
