use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, Query}, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, TransactionTrait,
};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use super::sea_orm_entity::payments;
use crate::auth::adapter::outgoing::sea_orm_entity::users;
use crate::auth::application::domain::entities::{SubscriptionStatus, UserId};
use crate::billing::application::domain::entities::{
    Activation, ExpirySweep, NewPayment, Renewal, RenewalCandidate, SubscriptionRecord,
};
use crate::billing::application::ports::outgoing::{
    SubscriptionRepository, SubscriptionRepositoryError,
};
use crate::notification::adapter::outgoing::sea_orm_entity::push_subscriptions;

#[derive(Clone, Debug)]
pub struct SubscriptionRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SubscriptionRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_db_err(e: DbErr) -> SubscriptionRepositoryError {
        SubscriptionRepositoryError::DatabaseError(e.to_string())
    }

    async fn insert_payment(
        txn: &DatabaseTransaction,
        payment: NewPayment,
    ) -> Result<(), DbErr> {
        payments::Entity::insert(payments::ActiveModel::from(payment))
            .exec_without_returning(txn)
            .await
            .map(|_| ())
    }

    /// Runs `update` then books `payment` in one transaction. Zero updated
    /// rows means the user does not exist.
    async fn update_and_book(
        &self,
        update: sea_orm::UpdateMany<users::Entity>,
        payment: NewPayment,
    ) -> Result<(), SubscriptionRepositoryError> {
        let txn = self.db.begin().await.map_err(Self::map_db_err)?;

        match update.exec(&txn).await {
            Ok(res) if res.rows_affected == 0 => {
                let _ = txn.rollback().await;
                return Err(SubscriptionRepositoryError::UserNotFound);
            }
            Ok(_) => {}
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }
        }

        if let Err(e) = Self::insert_payment(&txn, payment).await {
            let _ = txn.rollback().await;
            return Err(Self::map_db_err(e));
        }

        txn.commit().await.map_err(Self::map_db_err)
    }

    /// Lapsed trials and subscriptions, plus expired accounts that still
    /// have push turned on or endpoints stored.
    fn lapsed(now: DateTime<Utc>) -> Condition {
        let with_endpoints = Query::select()
            .column(push_subscriptions::Column::UserId)
            .from(push_subscriptions::Entity)
            .to_owned();

        Condition::any()
            .add(
                Condition::all()
                    .add(users::Column::SubscriptionStatus.eq(SubscriptionStatus::Trial.as_str()))
                    .add(users::Column::TrialEndDate.lt(now)),
            )
            .add(
                Condition::all()
                    .add(users::Column::SubscriptionStatus.is_in([
                        SubscriptionStatus::Active.as_str(),
                        SubscriptionStatus::Cancelled.as_str(),
                    ]))
                    .add(users::Column::SubscriptionEndDate.lt(now)),
            )
            .add(
                Condition::all()
                    .add(users::Column::SubscriptionStatus.eq(SubscriptionStatus::Expired.as_str()))
                    .add(
                        Condition::any()
                            .add(users::Column::PushNotifications.eq(true))
                            .add(users::Column::Id.in_subquery(with_endpoints)),
                    ),
            )
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionRepositoryPostgres {
    async fn find(
        &self,
        user_id: UserId,
    ) -> Result<Option<SubscriptionRecord>, SubscriptionRepositoryError> {
        let Some(user) = users::Entity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
        else {
            return Ok(None);
        };

        let status = user
            .subscription_status
            .parse::<SubscriptionStatus>()
            .map_err(|e| SubscriptionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(Some(SubscriptionRecord {
            status,
            subscription_start: user.subscription_start_date.map(|d| d.to_utc()),
            subscription_end: user.subscription_end_date.map(|d| d.to_utc()),
            transaction_id: user.viva_transaction_id,
        }))
    }

    async fn record_payment(&self, payment: NewPayment) -> Result<(), SubscriptionRepositoryError> {
        payments::Entity::insert(payments::ActiveModel::from(payment))
            .exec_without_returning(&*self.db)
            .await
            .map(|_| ())
            .map_err(Self::map_db_err)
    }

    async fn activate(&self, activation: Activation) -> Result<(), SubscriptionRepositoryError> {
        let mut update = users::Entity::update_many()
            .col_expr(
                users::Column::SubscriptionStatus,
                Expr::value(SubscriptionStatus::Active.as_str()),
            )
            .col_expr(
                users::Column::SubscriptionStartDate,
                Expr::value(activation.starts_at.fixed_offset()),
            )
            .col_expr(
                users::Column::SubscriptionEndDate,
                Expr::value(activation.ends_at.fixed_offset()),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(users::Column::Id.eq(activation.user_id.value()));

        if let Some(transaction_id) = activation.transaction_id {
            update = update.col_expr(users::Column::VivaTransactionId, Expr::value(transaction_id));
        }

        self.update_and_book(update, activation.payment).await
    }

    async fn reverse(
        &self,
        user_id: UserId,
        payment: NewPayment,
    ) -> Result<(), SubscriptionRepositoryError> {
        let update = users::Entity::update_many()
            .col_expr(
                users::Column::SubscriptionStatus,
                Expr::value(SubscriptionStatus::Expired.as_str()),
            )
            .col_expr(users::Column::PushNotifications, Expr::value(false))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(users::Column::Id.eq(user_id.value()));

        self.update_and_book(update, payment).await
    }

    async fn mark_cancelled(&self, user_id: UserId) -> Result<(), SubscriptionRepositoryError> {
        let res = users::Entity::update_many()
            .col_expr(
                users::Column::SubscriptionStatus,
                Expr::value(SubscriptionStatus::Cancelled.as_str()),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(users::Column::Id.eq(user_id.value()))
            .exec(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        if res.rows_affected == 0 {
            return Err(SubscriptionRepositoryError::UserNotFound);
        }
        Ok(())
    }

    async fn expire_lapsed(
        &self,
        now: DateTime<Utc>,
    ) -> Result<ExpirySweep, SubscriptionRepositoryError> {
        let txn = self.db.begin().await.map_err(Self::map_db_err)?;

        let ids: Vec<Uuid> = match users::Entity::find()
            .select_only()
            .column(users::Column::Id)
            .filter(Self::lapsed(now))
            .into_tuple()
            .all(&txn)
            .await
        {
            Ok(ids) => ids,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }
        };

        if ids.is_empty() {
            txn.commit().await.map_err(Self::map_db_err)?;
            return Ok(ExpirySweep::default());
        }

        let expired = users::Entity::update_many()
            .col_expr(
                users::Column::SubscriptionStatus,
                Expr::value(SubscriptionStatus::Expired.as_str()),
            )
            .col_expr(users::Column::PushNotifications, Expr::value(false))
            .col_expr(users::Column::UpdatedAt, Expr::value(now.fixed_offset()))
            .filter(users::Column::Id.is_in(ids.clone()))
            .exec(&txn)
            .await;
        let expired_users = match expired {
            Ok(res) => res.rows_affected,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }
        };

        let removed = push_subscriptions::Entity::delete_many()
            .filter(push_subscriptions::Column::UserId.is_in(ids))
            .exec(&txn)
            .await;
        let push_subscriptions_removed = match removed {
            Ok(res) => res.rows_affected,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }
        };

        txn.commit().await.map_err(Self::map_db_err)?;

        if expired_users == 0 {
            warn!("Lapsed users vanished before they could be expired");
        }

        Ok(ExpirySweep {
            expired_users,
            push_subscriptions_removed,
        })
    }

    async fn renewal_candidates(
        &self,
        now: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<RenewalCandidate>, SubscriptionRepositoryError> {
        let rows = users::Entity::find()
            .filter(users::Column::SubscriptionStatus.eq(SubscriptionStatus::Active.as_str()))
            .filter(users::Column::SubscriptionEndDate.gt(now))
            .filter(users::Column::SubscriptionEndDate.lte(until))
            .filter(users::Column::VivaTransactionId.is_not_null())
            .all(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|user| {
                Some(RenewalCandidate {
                    user_id: UserId::from(user.id),
                    subscription_end: user.subscription_end_date?.to_utc(),
                    transaction_id: user.viva_transaction_id?,
                })
            })
            .collect())
    }

    async fn has_payment_since(
        &self,
        user_id: UserId,
        payment_type: &str,
        since: DateTime<Utc>,
    ) -> Result<bool, SubscriptionRepositoryError> {
        let count = payments::Entity::find()
            .filter(payments::Column::UserId.eq(user_id.value()))
            .filter(payments::Column::PaymentType.eq(payment_type))
            .filter(payments::Column::CreatedAt.gt(since.fixed_offset()))
            .count(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        Ok(count > 0)
    }

    async fn renew(&self, renewal: Renewal) -> Result<(), SubscriptionRepositoryError> {
        let update = users::Entity::update_many()
            .col_expr(
                users::Column::SubscriptionEndDate,
                Expr::value(renewal.ends_at.fixed_offset()),
            )
            .col_expr(
                users::Column::VivaTransactionId,
                Expr::value(renewal.transaction_id),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(users::Column::Id.eq(renewal.user_id.value()));

        self.update_and_book(update, renewal.payment).await
    }
}
