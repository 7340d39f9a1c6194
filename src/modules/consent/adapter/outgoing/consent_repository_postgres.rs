use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::consent_records;
use crate::consent::application::ports::outgoing::{
    ConsentRepository, ConsentRepositoryError, NewConsentRecord,
};

#[derive(Clone, Debug)]
pub struct ConsentRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ConsentRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConsentRepository for ConsentRepositoryPostgres {
    async fn record(&self, record: NewConsentRecord) -> Result<Uuid, ConsentRepositoryError> {
        let id = Uuid::new_v4();
        let model = consent_records::ActiveModel::from_record(id, record)
            .map_err(|e| ConsentRepositoryError::DatabaseError(e.to_string()))?;

        consent_records::Entity::insert(model)
            .exec_without_returning(&*self.db)
            .await
            .map_err(|e| ConsentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(id)
    }
}
