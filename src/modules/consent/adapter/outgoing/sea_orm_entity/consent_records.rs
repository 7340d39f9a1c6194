use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use crate::consent::application::ports::outgoing::NewConsentRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "consent_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub visitor_id: String,
    pub user_id: Option<Uuid>,
    #[sea_orm(column_type = "JsonBinary")]
    pub consent: Json,
    pub recorded_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::auth::adapter::outgoing::sea_orm_entity::users::Entity",
        from = "Column::UserId",
        to = "crate::auth::adapter::outgoing::sea_orm_entity::users::Column::Id",
        on_delete = "SetNull"
    )]
    Users,
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn from_record(id: Uuid, record: NewConsentRecord) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: Set(id),
            visitor_id: Set(record.visitor_id),
            user_id: Set(record.user_id.map(|u| u.value())),
            consent: Set(serde_json::to_value(record.state)?),
            recorded_at: Set(record.recorded_at.fixed_offset()),
        })
    }
}
