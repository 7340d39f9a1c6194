use async_trait::async_trait;

use crate::announcement::application::{
    domain::entities::Category,
    ports::outgoing::{CategoryQuery, CategoryQueryError},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCategoriesRequest {
    pub parent_id: Option<i32>,
    pub include_counts: bool,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListCategoriesError {
    #[error("Query error: {0}")]
    QueryError(String),
}

impl From<CategoryQueryError> for ListCategoriesError {
    fn from(err: CategoryQueryError) -> Self {
        ListCategoriesError::QueryError(err.to_string())
    }
}

#[async_trait]
pub trait IListCategoriesUseCase: Send + Sync {
    async fn execute(
        &self,
        request: ListCategoriesRequest,
    ) -> Result<Vec<Category>, ListCategoriesError>;
}

#[derive(Clone)]
pub struct ListCategoriesUseCase<Q>
where
    Q: CategoryQuery + Send + Sync,
{
    query: Q,
}

impl<Q> ListCategoriesUseCase<Q>
where
    Q: CategoryQuery + Send + Sync,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IListCategoriesUseCase for ListCategoriesUseCase<Q>
where
    Q: CategoryQuery + Send + Sync,
{
    async fn execute(
        &self,
        request: ListCategoriesRequest,
    ) -> Result<Vec<Category>, ListCategoriesError> {
        Ok(self
            .query
            .list(request.parent_id, request.include_counts)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::fixtures::sample_category;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingQuery {
        calls: Mutex<Vec<(Option<i32>, bool)>>,
    }

    #[async_trait]
    impl CategoryQuery for RecordingQuery {
        async fn list(
            &self,
            parent_id: Option<i32>,
            include_counts: bool,
        ) -> Result<Vec<Category>, CategoryQueryError> {
            self.calls.lock().unwrap().push((parent_id, include_counts));
            Ok(vec![sample_category(2)])
        }

        async fn find_by_id(&self, _id: i32) -> Result<Option<Category>, CategoryQueryError> {
            unimplemented!("Not used in this test")
        }
    }

    #[tokio::test]
    async fn forwards_filter_to_query() {
        let uc = ListCategoriesUseCase::new(RecordingQuery::default());

        let categories = uc
            .execute(ListCategoriesRequest {
                parent_id: Some(1),
                include_counts: true,
            })
            .await
            .unwrap();

        assert_eq!(categories.len(), 1);
        assert_eq!(*uc.query.calls.lock().unwrap(), vec![(Some(1), true)]);
    }
}
