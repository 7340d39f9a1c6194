use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::domain::saved_search::{NewSavedSearch, SavedSearch};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SavedSearchRepositoryError {
    #[error("Category not found")]
    CategoryNotFound,
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait SavedSearchRepository: Send + Sync {
    /// Oldest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<SavedSearch>, SavedSearchRepositoryError>;

    async fn create(
        &self,
        user_id: UserId,
        search: NewSavedSearch,
    ) -> Result<i32, SavedSearchRepositoryError>;
}
