use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SAVED_SEARCH_NAME_MAX_LEN: usize = 255;

/// A stored filter the user wants to be alerted about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SavedSearch {
    pub id: i32,
    pub name: String,
    pub category_id: Option<i32>,
    pub keywords: Option<String>,
    pub notify_email: bool,
    pub notify_push: bool,
    pub notify_sms: bool,
    pub created_at: DateTime<Utc>,
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct NewSavedSearch {
    pub name: String,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default = "enabled")]
    pub notify_email: bool,
    #[serde(default = "enabled")]
    pub notify_push: bool,
    #[serde(default)]
    pub notify_sms: bool,
}

impl NewSavedSearch {
    /// Trims the text fields; blank keywords become `None`.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.keywords = self
            .keywords
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        self
    }
}
