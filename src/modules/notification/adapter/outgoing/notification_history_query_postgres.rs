use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use std::sync::Arc;

use super::sea_orm_entity::notification_logs;
use crate::auth::application::domain::entities::UserId;
use crate::notification::application::domain::entities::NotificationLogEntry;
use crate::notification::application::ports::outgoing::{
    NotificationHistoryQuery, NotificationHistoryQueryError,
};

#[derive(Clone, Debug)]
pub struct NotificationHistoryQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl NotificationHistoryQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationHistoryQuery for NotificationHistoryQueryPostgres {
    async fn list(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<NotificationLogEntry>, NotificationHistoryQueryError> {
        let rows = notification_logs::Entity::find()
            .filter(notification_logs::Column::UserId.eq(user_id.value()))
            .order_by_desc(notification_logs::Column::SentAt)
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(|e| NotificationHistoryQueryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().filter_map(|m| m.into_entry()).collect())
    }
}
