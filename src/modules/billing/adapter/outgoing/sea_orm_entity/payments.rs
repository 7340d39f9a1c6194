use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use crate::billing::application::domain::entities::NewPayment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount_cents: i64,
    pub currency: String,
    pub payment_type: String,
    pub provider_order_code: Option<String>,
    pub provider_transaction_id: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::auth::adapter::outgoing::sea_orm_entity::users::Entity",
        from = "Column::UserId",
        to = "crate::auth::adapter::outgoing::sea_orm_entity::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewPayment> for ActiveModel {
    fn from(payment: NewPayment) -> Self {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(payment.user_id.value()),
            amount_cents: Set(payment.amount_cents),
            currency: Set(payment.currency),
            payment_type: Set(payment.payment_type),
            provider_order_code: Set(payment.provider_order_code),
            provider_transaction_id: Set(payment.provider_transaction_id),
            status: Set(payment.status.as_str().to_string()),
            created_at: Set(Utc::now().into()),
        }
    }
}
