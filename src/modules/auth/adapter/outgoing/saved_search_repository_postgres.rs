use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

use super::sea_orm_entity::saved_searches;
use crate::announcement::adapter::outgoing::sea_orm_entity::categories;
use crate::auth::application::domain::entities::UserId;
use crate::auth::application::domain::saved_search::{NewSavedSearch, SavedSearch};
use crate::auth::application::ports::outgoing::{SavedSearchRepository, SavedSearchRepositoryError};

#[derive(Clone, Debug)]
pub struct SavedSearchRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SavedSearchRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> SavedSearchRepositoryError {
    SavedSearchRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl SavedSearchRepository for SavedSearchRepositoryPostgres {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<SavedSearch>, SavedSearchRepositoryError> {
        let rows = saved_searches::Entity::find()
            .filter(saved_searches::Column::UserId.eq(user_id.value()))
            .order_by_asc(saved_searches::Column::CreatedAt)
            .order_by_asc(saved_searches::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(SavedSearch::from).collect())
    }

    async fn create(
        &self,
        user_id: UserId,
        search: NewSavedSearch,
    ) -> Result<i32, SavedSearchRepositoryError> {
        if let Some(category_id) = search.category_id {
            let exists = categories::Entity::find_by_id(category_id)
                .one(&*self.db)
                .await
                .map_err(map_db_err)?
                .is_some();
            if !exists {
                return Err(SavedSearchRepositoryError::CategoryNotFound);
            }
        }

        let model = saved_searches::Entity::insert(saved_searches::ActiveModel {
            id: NotSet,
            user_id: Set(user_id.value()),
            name: Set(search.name),
            category_id: Set(search.category_id),
            keywords: Set(search.keywords),
            notify_email: Set(search.notify_email),
            notify_push: Set(search.notify_push),
            notify_sms: Set(search.notify_sms),
            created_at: Set(Utc::now().fixed_offset()),
        })
        .exec_with_returning(&*self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn row(id: i32, user_id: UserId) -> saved_searches::Model {
        saved_searches::Model {
            id,
            user_id: user_id.value(),
            name: format!("search {id}"),
            category_id: None,
            keywords: Some("ibuprofen".into()),
            notify_email: true,
            notify_push: true,
            notify_sms: false,
            created_at: Utc::now().fixed_offset(),
        }
    }

    fn category(id: i32) -> categories::Model {
        categories::Model {
            id,
            name: "Ανακλήσεις".into(),
            slug: "anakliseis".into(),
            url: "https://www.eof.gr/category/farmaka/anakliseis/".into(),
            parent_id: None,
            category_type: None,
            created_at: Utc::now().fixed_offset(),
        }
    }

    fn new_search(category_id: Option<i32>) -> NewSavedSearch {
        NewSavedSearch {
            name: "Recalls".into(),
            category_id,
            keywords: None,
            notify_email: true,
            notify_push: false,
            notify_sms: false,
        }
    }

    #[tokio::test]
    async fn list_filters_by_owner() {
        let user_id = UserId::new();
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![row(1, user_id), row(2, user_id)]])
                .into_connection(),
        );
        let repo = SavedSearchRepositoryPostgres::new(db.clone());

        let searches = repo.list_for_user(user_id).await.unwrap();
        assert_eq!(searches.len(), 2);
        assert_eq!(searches[0].keywords.as_deref(), Some("ibuprofen"));

        drop(repo);
        let log = format!(
            "{:?}",
            Arc::try_unwrap(db).unwrap().into_transaction_log()
        );
        assert!(log.contains("saved_searches"));
        assert!(log.contains(&user_id.value().to_string()));
        assert!(log.contains("ORDER BY"));
    }

    #[tokio::test]
    async fn create_checks_category_then_inserts() {
        let user_id = UserId::new();
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![category(4)]])
                .append_query_results([vec![row(11, user_id)]])
                .into_connection(),
        );
        let repo = SavedSearchRepositoryPostgres::new(db.clone());

        let id = repo.create(user_id, new_search(Some(4))).await.unwrap();
        assert_eq!(id, 11);

        drop(repo);
        let log = format!(
            "{:?}",
            Arc::try_unwrap(db).unwrap().into_transaction_log()
        );
        assert!(log.contains("categories"));
        assert!(log.contains("INSERT INTO"));
        assert!(log.contains("Recalls"));
    }

    #[tokio::test]
    async fn unknown_category_is_rejected_without_insert() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<categories::Model>::new()])
                .into_connection(),
        );
        let repo = SavedSearchRepositoryPostgres::new(db.clone());

        let result = repo.create(UserId::new(), new_search(Some(99))).await;
        assert_eq!(result, Err(SavedSearchRepositoryError::CategoryNotFound));

        drop(repo);
        let log = format!(
            "{:?}",
            Arc::try_unwrap(db).unwrap().into_transaction_log()
        );
        assert!(!log.contains("INSERT INTO"));
    }
}
