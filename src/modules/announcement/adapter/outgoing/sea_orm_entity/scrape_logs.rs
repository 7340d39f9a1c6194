use sea_orm::entity::prelude::*;

use crate::announcement::application::domain::entities::{ScrapeLogEntry, ScrapeStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scrape_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub start_time: DateTimeWithTimeZone,
    pub end_time: Option<DateTimeWithTimeZone>,
    pub status: String,
    pub posts_scraped: i32,
    pub posts_new: i32,
    pub posts_updated: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub errors: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub duration_seconds: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `None` when the stored status is not one we write.
    pub fn into_entry(self) -> Option<ScrapeLogEntry> {
        Some(ScrapeLogEntry {
            id: self.id,
            start_time: self.start_time.to_utc(),
            end_time: self.end_time.map(|d| d.to_utc()),
            status: ScrapeStatus::from_db(&self.status)?,
            posts_scraped: self.posts_scraped,
            posts_new: self.posts_new,
            posts_updated: self.posts_updated,
            errors: self.errors,
            duration_seconds: self.duration_seconds,
        })
    }
}
