use async_trait::async_trait;

use crate::announcement::application::domain::entities::Category;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CategoryQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait CategoryQuery: Send + Sync {
    /// `parent_id = None` lists every category.
    async fn list(
        &self,
        parent_id: Option<i32>,
        include_counts: bool,
    ) -> Result<Vec<Category>, CategoryQueryError>;

    /// Always carries `post_count`.
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, CategoryQueryError>;
}
