use chrono::{DateTime, Utc};

use crate::announcement::application::domain::entities::ScrapeStatus;

/// One entry of a category listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedPost {
    pub url: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedAttachment {
    pub file_url: String,
    pub file_name: String,
    /// Lower-case extension without the dot.
    pub file_type: String,
}

/// What a post page adds to its listing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostContent {
    pub content: Option<String>,
    pub attachments: Vec<ScrapedAttachment>,
    pub meta_description: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    New,
    Updated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeCounts {
    pub scraped: i32,
    pub new: i32,
    pub updated: i32,
    pub failed: i32,
}

impl ScrapeCounts {
    pub fn record(&mut self, outcome: Option<UpsertOutcome>) {
        self.scraped += 1;
        match outcome {
            Some(UpsertOutcome::New) => self.new += 1,
            Some(UpsertOutcome::Updated) => self.updated += 1,
            None => self.failed += 1,
        }
    }

    pub fn add(&mut self, other: ScrapeCounts) {
        self.scraped += other.scraped;
        self.new += other.new;
        self.updated += other.updated;
        self.failed += other.failed;
    }
}

/// Final state written to the run's scrape log.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeReport {
    pub log_id: i32,
    pub status: ScrapeStatus,
    pub counts: ScrapeCounts,
    pub errors: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ScrapeReport {
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    pub fn errors_text(&self) -> Option<String> {
        (!self.errors.is_empty()).then(|| self.errors.join("\n"))
    }
}
