use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QuerySelect, RelationTrait,
};
use std::collections::HashSet;
use std::sync::Arc;

use super::sea_orm_entity::{posts, user_read_posts};
use crate::announcement::application::ports::outgoing::{ReadTracker, ReadTrackerError};
use crate::auth::application::domain::entities::UserId;

#[derive(Clone, Debug)]
pub struct ReadTrackerPostgres {
    db: Arc<DatabaseConnection>,
}

impl ReadTrackerPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> ReadTrackerError {
    ReadTrackerError::DatabaseError(e.to_string())
}

#[async_trait]
impl ReadTracker for ReadTrackerPostgres {
    async fn mark_read(&self, user_id: UserId, post_id: i32) -> Result<(), ReadTrackerError> {
        let exists = posts::Entity::find_by_id(post_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .is_some();
        if !exists {
            return Err(ReadTrackerError::PostNotFound);
        }

        let marker = user_read_posts::ActiveModel {
            user_id: Set(user_id.value()),
            post_id: Set(post_id),
            read_at: Set(Utc::now().into()),
            ..Default::default()
        };

        user_read_posts::Entity::insert(marker)
            .on_conflict(
                OnConflict::columns([
                    user_read_posts::Column::UserId,
                    user_read_posts::Column::PostId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn read_among(
        &self,
        user_id: UserId,
        post_ids: &[i32],
    ) -> Result<HashSet<i32>, ReadTrackerError> {
        if post_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let read: Vec<i32> = user_read_posts::Entity::find()
            .select_only()
            .column(user_read_posts::Column::PostId)
            .filter(user_read_posts::Column::UserId.eq(user_id.value()))
            .filter(user_read_posts::Column::PostId.is_in(post_ids.to_vec()))
            .into_tuple()
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(read.into_iter().collect())
    }

    async fn count_read(&self, user_id: UserId) -> Result<u64, ReadTrackerError> {
        user_read_posts::Entity::find()
            .join(JoinType::InnerJoin, user_read_posts::Relation::Posts.def())
            .filter(user_read_posts::Column::UserId.eq(user_id.value()))
            .filter(posts::Column::IsActive.eq(true))
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }
}
