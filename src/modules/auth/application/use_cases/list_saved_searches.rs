use async_trait::async_trait;

use crate::auth::application::{
    domain::{entities::UserId, saved_search::SavedSearch},
    ports::outgoing::SavedSearchRepository,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListSavedSearchesError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait IListSavedSearchesUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<Vec<SavedSearch>, ListSavedSearchesError>;
}

#[derive(Clone)]
pub struct ListSavedSearchesUseCase<R>
where
    R: SavedSearchRepository + Send + Sync,
{
    repository: R,
}

impl<R> ListSavedSearchesUseCase<R>
where
    R: SavedSearchRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IListSavedSearchesUseCase for ListSavedSearchesUseCase<R>
where
    R: SavedSearchRepository + Send + Sync,
{
    async fn execute(&self, user_id: UserId) -> Result<Vec<SavedSearch>, ListSavedSearchesError> {
        self.repository
            .list_for_user(user_id)
            .await
            .map_err(|e| ListSavedSearchesError::RepositoryError(e.to_string()))
    }
}
