use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use std::sync::Arc;
use tracing::warn;

use super::sea_orm_entity::scrape_logs;
use crate::announcement::application::domain::entities::{ScrapeLogEntry, ScrapeStatus};
use crate::announcement::application::ports::outgoing::{ScrapeLogQuery, ScrapeLogQueryError};

#[derive(Clone, Debug)]
pub struct ScrapeLogQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ScrapeLogQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScrapeLogQuery for ScrapeLogQueryPostgres {
    async fn list(
        &self,
        status: Option<ScrapeStatus>,
        limit: u64,
    ) -> Result<Vec<ScrapeLogEntry>, ScrapeLogQueryError> {
        let mut query = scrape_logs::Entity::find();
        if let Some(status) = status {
            query = query.filter(scrape_logs::Column::Status.eq(status.as_str()));
        }

        let models = query
            .order_by_desc(scrape_logs::Column::StartTime)
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(|e| ScrapeLogQueryError::DatabaseError(e.to_string()))?;

        Ok(models
            .into_iter()
            .filter_map(|m| {
                let id = m.id;
                let entry = m.into_entry();
                if entry.is_none() {
                    warn!(scrape_log_id = id, "Skipping scrape log with unknown status");
                }
                entry
            })
            .collect())
    }
}
