use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::announcement::application::domain::entities::Post;
use crate::assistant::application::{
    domain::{
        faq::best_answer,
        query::{is_search_query, search_term},
    },
    ports::outgoing::ArticleSearch,
};

pub const SEARCH_LIMIT: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReplyKind {
    Faq,
    Articles,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ArticleSummary {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub excerpt: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
}

impl From<Post> for ArticleSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            url: post.url,
            excerpt: post.excerpt,
            publish_date: post.publish_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AssistantReply {
    pub kind: ReplyKind,
    pub answer: String,
    pub articles: Vec<ArticleSummary>,
}

impl AssistantReply {
    fn faq(message: &str) -> Self {
        Self {
            kind: ReplyKind::Faq,
            answer: best_answer(message).to_string(),
            articles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AskAssistantError {
    #[error("Message must not be empty")]
    EmptyMessage,
}

#[async_trait]
pub trait IAskAssistantUseCase: Send + Sync {
    async fn execute(&self, message: &str) -> Result<AssistantReply, AskAssistantError>;
}

pub struct AskAssistantUseCase<S>
where
    S: ArticleSearch,
{
    search: S,
}

impl<S> AskAssistantUseCase<S>
where
    S: ArticleSearch,
{
    pub fn new(search: S) -> Self {
        Self { search }
    }
}

fn found_text(count: usize) -> String {
    if count == 1 {
        "Βρήκα 1 σχετική ανακοίνωση του ΕΟΦ για την αναζήτησή σας:".to_string()
    } else {
        format!("Βρήκα {count} σχετικές ανακοινώσεις του ΕΟΦ για την αναζήτησή σας:")
    }
}

fn not_found_text(term: &str) -> String {
    format!(
        "Δεν βρήκα ανακοινώσεις του ΕΟΦ σχετικά με \"{term}\". Μπορείτε να δοκιμάσετε διαφορετικούς όρους αναζήτησης ή να δείτε τις πρόσφατες ανακοινώσεις στον πίνακα ελέγχου."
    )
}

#[async_trait]
impl<S> IAskAssistantUseCase for AskAssistantUseCase<S>
where
    S: ArticleSearch,
{
    async fn execute(&self, message: &str) -> Result<AssistantReply, AskAssistantError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AskAssistantError::EmptyMessage);
        }

        if !is_search_query(message) {
            return Ok(AssistantReply::faq(message));
        }

        let term = search_term(message);
        if term.is_empty() {
            return Ok(AssistantReply::faq(message));
        }

        match self.search.search(&term, SEARCH_LIMIT).await {
            Ok(posts) if posts.is_empty() => Ok(AssistantReply {
                kind: ReplyKind::Articles,
                answer: not_found_text(&term),
                articles: Vec::new(),
            }),
            Ok(posts) => Ok(AssistantReply {
                kind: ReplyKind::Articles,
                answer: found_text(posts.len()),
                articles: posts.into_iter().map(ArticleSummary::from).collect(),
            }),
            Err(e) => {
                warn!(error = %e, "Article search failed, answering from FAQ");
                Ok(AssistantReply::faq(message))
            }
        }
    }
}
