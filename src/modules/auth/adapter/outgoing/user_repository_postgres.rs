use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity, Model as UserModel,
};
use crate::auth::application::domain::entities::{
    NotificationPreferences, SubscriptionStatus, UserAccount, UserId,
};
use crate::auth::application::ports::outgoing::{
    NewUser, ProfileChanges, UserRepository, UserRepositoryError,
};
use crate::notification::adapter::outgoing::sea_orm_entity::push_subscriptions;

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_account(model: UserModel) -> Result<UserAccount, UserRepositoryError> {
        model
            .into_account()
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))
    }

    fn db_error(e: DbErr) -> UserRepositoryError {
        UserRepositoryError::DatabaseError(e.to_string())
    }

    async fn load(&self, user_id: UserId) -> Result<UserModel, UserRepositoryError> {
        UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(Self::db_error)?
            .ok_or(UserRepositoryError::UserNotFound)
    }
}

fn apply<T: Into<sea_orm::Value>>(
    target: &mut sea_orm::ActiveValue<T>,
    change: Option<T>,
) {
    if let Some(value) = change {
        *target = Set(value);
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: NewUser) -> Result<UserAccount, UserRepositoryError> {
        let now = Utc::now();
        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            full_name: Set(user.full_name),
            phone_number: Set(user.phone_number),
            subscription_status: Set(SubscriptionStatus::Trial.as_str().to_string()),
            trial_start_date: Set(now.into()),
            trial_end_date: Set(user.trial_end_date.into()),
            subscription_start_date: Set(None),
            subscription_end_date: Set(None),
            viva_transaction_id: Set(None),
            email_notifications: Set(true),
            push_notifications: Set(true),
            sms_notifications: Set(false),
            sms_credits: Set(0.0),
            company_name: Set(None),
            tax_id: Set(None),
            tax_office: Set(None),
            billing_address: Set(None),
            billing_city: Set(None),
            billing_postal_code: Set(None),
            invoice_type: NotSet,
            created_at: NotSet,
            updated_at: NotSet,
            last_login: Set(None),
        };

        let inserted = active_user.insert(&*self.db).await.map_err(|e| {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("23505")
                || err_str.contains("duplicate key")
                || err_str.contains("unique constraint")
            {
                return UserRepositoryError::UserAlreadyExists;
            }
            UserRepositoryError::DatabaseError(e.to_string())
        })?;

        Self::to_account(inserted)
    }

    async fn record_login(
        &self,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        UserEntity::update_many()
            .col_expr(UserColumn::LastLogin, Expr::value(at.fixed_offset()))
            .filter(UserColumn::Id.eq(user_id.value()))
            .exec(&*self.db)
            .await
            .map_err(Self::db_error)?;

        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<UserAccount, UserRepositoryError> {
        let mut active_user: UserActiveModel = self.load(user_id).await?.into();

        apply(&mut active_user.full_name, changes.full_name);
        apply(&mut active_user.phone_number, changes.phone_number);
        apply(&mut active_user.company_name, changes.company_name);
        apply(&mut active_user.tax_id, changes.tax_id);
        apply(&mut active_user.tax_office, changes.tax_office);
        apply(&mut active_user.billing_address, changes.billing_address);
        apply(&mut active_user.billing_city, changes.billing_city);
        apply(&mut active_user.billing_postal_code, changes.billing_postal_code);
        apply(
            &mut active_user.invoice_type,
            changes.invoice_type.map(|t| t.as_str().to_string()),
        );

        let updated = active_user
            .update(&*self.db)
            .await
            .map_err(Self::db_error)?;

        Self::to_account(updated)
    }

    async fn update_notification_preferences(
        &self,
        user_id: UserId,
        preferences: NotificationPreferences,
    ) -> Result<UserAccount, UserRepositoryError> {
        let mut active_user: UserActiveModel = self.load(user_id).await?.into();

        active_user.email_notifications = Set(preferences.email);
        active_user.push_notifications = Set(preferences.push);
        active_user.sms_notifications = Set(preferences.sms);

        let updated = active_user
            .update(&*self.db)
            .await
            .map_err(Self::db_error)?;

        Self::to_account(updated)
    }

    async fn expire_subscription(
        &self,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> Result<u64, UserRepositoryError> {
        let txn = self.db.begin().await.map_err(Self::db_error)?;

        let expired = UserEntity::update_many()
            .col_expr(
                UserColumn::SubscriptionStatus,
                Expr::value(SubscriptionStatus::Expired.as_str()),
            )
            .col_expr(UserColumn::PushNotifications, Expr::value(false))
            .col_expr(UserColumn::UpdatedAt, Expr::value(at.fixed_offset()))
            .filter(UserColumn::Id.eq(user_id.value()))
            .exec(&txn)
            .await;
        match expired {
            Ok(res) if res.rows_affected == 0 => {
                let _ = txn.rollback().await;
                return Err(UserRepositoryError::UserNotFound);
            }
            Ok(_) => {}
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::db_error(e));
            }
        }

        let removed = push_subscriptions::Entity::delete_many()
            .filter(push_subscriptions::Column::UserId.eq(user_id.value()))
            .exec(&txn)
            .await;
        let removed = match removed {
            Ok(res) => res.rows_affected,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::db_error(e));
            }
        };

        txn.commit().await.map_err(Self::db_error)?;
        Ok(removed)
    }
}
