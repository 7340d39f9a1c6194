use async_trait::async_trait;

use crate::announcement::application::domain::entities::Post;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArticleSearchError {
    #[error("Search failed: {0}")]
    SearchFailed(String),
}

#[async_trait]
pub trait ArticleSearch: Send + Sync {
    /// Active posts whose title or content contains `term`, newest first.
    async fn search(&self, term: &str, limit: u64) -> Result<Vec<Post>, ArticleSearchError>;
}
