use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Category {
    pub id: i32,
    #[schema(example = "Ανακλήσεις Φαρμάκων Ανθρώπινης Χρήσης")]
    pub name: String,
    #[schema(example = "anakliseis-farmakon-anthropinis-xrisis-farmaka")]
    pub slug: String,
    pub url: String,
    pub parent_id: Option<i32>,
    pub category_type: Option<String>,
    /// Active posts in the category, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Attachment {
    pub id: i32,
    pub file_url: String,
    pub file_name: Option<String>,
    #[schema(example = "pdf")]
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub meta_description: Option<String>,
    pub tags: Vec<String>,
    pub is_active: bool,
    pub scraped_at: DateTime<Utc>,
    pub last_modified: Option<DateTime<Utc>>,
    pub attachments: Vec<Attachment>,
    /// Only present for an authenticated viewer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PostSort {
    #[default]
    PublishDate,
    Title,
    ScrapedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilter {
    pub category_id: Option<i32>,
    /// Case-insensitive match on title or content.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostListing {
    pub sort: PostSort,
    pub order: SortOrder,
    pub skip: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostPage {
    pub items: Vec<Post>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeStatus {
    Running,
    Success,
    Partial,
    Failed,
}

impl ScrapeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrapeStatus::Running => "running",
            ScrapeStatus::Success => "success",
            ScrapeStatus::Partial => "partial",
            ScrapeStatus::Failed => "failed",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "running" => Some(ScrapeStatus::Running),
            "success" => Some(ScrapeStatus::Success),
            "partial" => Some(ScrapeStatus::Partial),
            "failed" => Some(ScrapeStatus::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ScrapeLogEntry {
    pub id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: ScrapeStatus,
    pub posts_scraped: i32,
    pub posts_new: i32,
    pub posts_updated: i32,
    pub errors: Option<String>,
    pub duration_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LastScrape {
    pub end_time: Option<DateTime<Utc>>,
    pub posts_scraped: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SiteStats {
    pub total_posts: u64,
    pub total_categories: u64,
    pub total_attachments: u64,
    pub posts_last_7_days: u64,
    pub last_successful_scrape: Option<LastScrape>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_parameters_parse_from_query_strings() {
        let sort: PostSort = serde_json::from_str("\"scraped_at\"").unwrap();
        let order: SortOrder = serde_json::from_str("\"asc\"").unwrap();
        assert_eq!(sort, PostSort::ScrapedAt);
        assert_eq!(order, SortOrder::Asc);
        assert!(serde_json::from_str::<PostSort>("\"random\"").is_err());
    }

    #[test]
    fn scrape_status_round_trips_through_db_text() {
        for status in [
            ScrapeStatus::Running,
            ScrapeStatus::Success,
            ScrapeStatus::Partial,
            ScrapeStatus::Failed,
        ] {
            assert_eq!(ScrapeStatus::from_db(status.as_str()), Some(status));
        }
        assert_eq!(ScrapeStatus::from_db("queued"), None);
    }
}
