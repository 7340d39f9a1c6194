use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;

use super::sea_orm_entity::users::{Column as UserColumn, Entity as UserEntity};
use crate::auth::application::domain::entities::{UserAccount, UserId};
use crate::auth::application::ports::outgoing::{UserCredentials, UserQuery, UserQueryError};

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserQueryError> {
        let user = UserEntity::find()
            .filter(UserColumn::Email.eq(email.trim().to_lowercase()))
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?;

        let Some(model) = user else {
            return Ok(None);
        };

        let password_hash = model.password_hash.clone();
        let account = model
            .into_account()
            .map_err(|e| UserQueryError::CorruptedRow(e.to_string()))?;

        Ok(Some(UserCredentials {
            account,
            password_hash,
        }))
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserAccount>, UserQueryError> {
        let user = UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?;

        user.map(|m| m.into_account())
            .transpose()
            .map_err(|e| UserQueryError::CorruptedRow(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::adapter::outgoing::sea_orm_entity::users::{sample_model, Model as UserModel};
    use crate::auth::application::domain::entities::SubscriptionStatus;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_find_by_id_success() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![sample_model(id)]])
            .into_connection();

        let query = UserQueryPostgres::new(Arc::new(db));
        let account = query.find_by_id(id.into()).await.unwrap().unwrap();

        assert_eq!(account.id.value(), id);
        assert_eq!(account.email, "user@example.com");
        assert_eq!(account.subscription_status, SubscriptionStatus::Trial);
        assert!(account.notifications.push);
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<UserModel>::new()])
            .into_connection();

        let query = UserQueryPostgres::new(Arc::new(db));
        assert!(query.find_by_id(UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("connection timeout".to_string())])
            .into_connection();

        let query = UserQueryPostgres::new(Arc::new(db));
        match query.find_by_id(UserId::new()).await.unwrap_err() {
            UserQueryError::DatabaseError(msg) => assert!(msg.contains("connection timeout")),
            other => panic!("Expected DatabaseError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_corrupted_status() {
        let id = Uuid::new_v4();
        let mut model = sample_model(id);
        model.subscription_status = "gold".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let query = UserQueryPostgres::new(Arc::new(db));
        assert!(matches!(
            query.find_by_id(id.into()).await,
            Err(UserQueryError::CorruptedRow(_))
        ));
    }

    #[tokio::test]
    async fn test_find_credentials_by_email_returns_hash() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![sample_model(id)]])
            .into_connection();

        let query = UserQueryPostgres::new(Arc::new(db));
        let creds = query
            .find_credentials_by_email("User@Example.com")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(creds.account.id.value(), id);
        assert!(creds.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_find_credentials_by_email_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<UserModel>::new()])
            .into_connection();

        let query = UserQueryPostgres::new(Arc::new(db));
        let result = query.find_credentials_by_email("nobody@example.com").await;
        assert!(result.unwrap().is_none());
    }
}
