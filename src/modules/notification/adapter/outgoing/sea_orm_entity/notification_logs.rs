use sea_orm::entity::prelude::*;

use crate::notification::application::domain::entities::{
    NotificationChannel, NotificationLogEntry,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notification_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Uuid,
    pub post_id: Option<i32>,
    pub notification_type: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub cost: f64,
    pub sent_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_entry(self) -> Option<NotificationLogEntry> {
        Some(NotificationLogEntry {
            id: self.id,
            post_id: self.post_id,
            notification_type: NotificationChannel::from_db(&self.notification_type)?,
            status: self.status,
            message: self.message,
            cost: self.cost,
            sent_at: self.sent_at.to_utc(),
        })
    }
}
