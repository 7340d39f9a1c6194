use sea_orm::entity::prelude::*;

use crate::auth::application::domain::saved_search::SavedSearch;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "saved_searches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Uuid,
    pub name: String,
    pub category_id: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub keywords: Option<String>,
    pub notify_email: bool,
    pub notify_push: bool,
    pub notify_sms: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SavedSearch {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category_id: model.category_id,
            keywords: model.keywords,
            notify_email: model.notify_email,
            notify_push: model.notify_push,
            notify_sms: model.notify_sms,
            created_at: model.created_at.to_utc(),
        }
    }
}
