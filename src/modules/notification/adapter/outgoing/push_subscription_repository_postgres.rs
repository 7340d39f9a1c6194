use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveValue::Set,
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::push_subscriptions;
use crate::auth::adapter::outgoing::sea_orm_entity::users;
use crate::auth::application::domain::entities::UserId;
use crate::notification::application::domain::entities::PushSubscription;
use crate::notification::application::ports::outgoing::{
    PushSubscriptionRepository, PushSubscriptionRepositoryError,
};

#[derive(Clone, Debug)]
pub struct PushSubscriptionRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PushSubscriptionRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_db_err(e: DbErr) -> PushSubscriptionRepositoryError {
        PushSubscriptionRepositoryError::DatabaseError(e.to_string())
    }

    fn set_push_flag(enabled: bool, user_id: Uuid) -> sea_orm::UpdateMany<users::Entity> {
        users::Entity::update_many()
            .col_expr(users::Column::PushNotifications, Expr::value(enabled))
            .filter(users::Column::Id.eq(user_id))
    }
}

#[async_trait]
impl PushSubscriptionRepository for PushSubscriptionRepositoryPostgres {
    async fn upsert(
        &self,
        user_id: UserId,
        subscription: &PushSubscription,
    ) -> Result<(), PushSubscriptionRepositoryError> {
        let row = push_subscriptions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.value()),
            endpoint: Set(subscription.endpoint.clone()),
            p256dh: Set(subscription.keys.p256dh.clone()),
            auth: Set(subscription.keys.auth.clone()),
            created_at: Set(Utc::now().into()),
        };

        let txn = self.db.begin().await.map_err(Self::map_db_err)?;

        let upserted = push_subscriptions::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    push_subscriptions::Column::UserId,
                    push_subscriptions::Column::Endpoint,
                ])
                .update_columns([
                    push_subscriptions::Column::P256dh,
                    push_subscriptions::Column::Auth,
                ])
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await;
        if let Err(e) = upserted {
            let _ = txn.rollback().await;
            return Err(Self::map_db_err(e));
        }

        if let Err(e) = Self::set_push_flag(true, user_id.value()).exec(&txn).await {
            let _ = txn.rollback().await;
            return Err(Self::map_db_err(e));
        }

        txn.commit().await.map_err(Self::map_db_err)
    }

    async fn remove_all(&self, user_id: UserId) -> Result<u64, PushSubscriptionRepositoryError> {
        let txn = self.db.begin().await.map_err(Self::map_db_err)?;

        let removed = match push_subscriptions::Entity::delete_many()
            .filter(push_subscriptions::Column::UserId.eq(user_id.value()))
            .exec(&txn)
            .await
        {
            Ok(res) => res.rows_affected,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }
        };

        if let Err(e) = Self::set_push_flag(false, user_id.value()).exec(&txn).await {
            let _ = txn.rollback().await;
            return Err(Self::map_db_err(e));
        }

        txn.commit().await.map_err(Self::map_db_err)?;
        Ok(removed)
    }
}
