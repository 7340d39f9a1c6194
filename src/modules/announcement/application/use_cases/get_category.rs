use async_trait::async_trait;

use crate::announcement::application::{
    domain::entities::Category,
    ports::outgoing::CategoryQuery,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetCategoryError {
    #[error("Category not found")]
    CategoryNotFound,
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait IGetCategoryUseCase: Send + Sync {
    async fn execute(&self, id: i32) -> Result<Category, GetCategoryError>;
}

#[derive(Clone)]
pub struct GetCategoryUseCase<Q>
where
    Q: CategoryQuery + Send + Sync,
{
    query: Q,
}

impl<Q> GetCategoryUseCase<Q>
where
    Q: CategoryQuery + Send + Sync,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IGetCategoryUseCase for GetCategoryUseCase<Q>
where
    Q: CategoryQuery + Send + Sync,
{
    async fn execute(&self, id: i32) -> Result<Category, GetCategoryError> {
        self.query
            .find_by_id(id)
            .await
            .map_err(|e| GetCategoryError::QueryError(e.to_string()))?
            .ok_or(GetCategoryError::CategoryNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcement::application::ports::outgoing::CategoryQueryError;
    use crate::tests::support::fixtures::sample_category;

    struct SingleCategory(Option<Category>);

    #[async_trait]
    impl CategoryQuery for SingleCategory {
        async fn list(
            &self,
            _parent_id: Option<i32>,
            _include_counts: bool,
        ) -> Result<Vec<Category>, CategoryQueryError> {
            unimplemented!("Not used in this test")
        }

        async fn find_by_id(&self, _id: i32) -> Result<Option<Category>, CategoryQueryError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn returns_category() {
        let uc = GetCategoryUseCase::new(SingleCategory(Some(sample_category(4))));
        assert_eq!(uc.execute(4).await.unwrap().id, 4);
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let uc = GetCategoryUseCase::new(SingleCategory(None));
        assert!(matches!(
            uc.execute(99).await,
            Err(GetCategoryError::CategoryNotFound)
        ));
    }
}
