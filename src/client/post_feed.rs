use tracing::warn;

use super::api::DrugAlertApi;
use super::error::ClientError;
use super::models::{FeedPage, FeedPost, PostsQuery};

/// One fetched page of announcements plus the filters applied on top of it
/// without another round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct PostFeed {
    page: FeedPage,
    search: String,
    category_id: Option<i32>,
}

impl PostFeed {
    pub fn new(page: FeedPage) -> Self {
        Self {
            page,
            search: String::new(),
            category_id: None,
        }
    }

    pub async fn load<A: DrugAlertApi>(
        api: &A,
        token: Option<&str>,
        query: &PostsQuery,
    ) -> Result<Self, ClientError> {
        api.list_posts(token, query).await.map(Self::new)
    }

    pub fn total(&self) -> u64 {
        self.page.total
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_category(&mut self, category_id: Option<i32>) {
        self.category_id = category_id;
    }

    fn matches(&self, post: &FeedPost, needle: &str) -> bool {
        if self.category_id.is_some() && post.category_id != self.category_id {
            return false;
        }
        if needle.is_empty() {
            return true;
        }

        post.title.to_lowercase().contains(needle)
            || post
                .content
                .as_deref()
                .is_some_and(|content| content.to_lowercase().contains(needle))
    }

    /// Posts passing the current search text and category.
    pub fn visible(&self) -> Vec<&FeedPost> {
        let needle = self.search.trim().to_lowercase();
        self.page
            .items
            .iter()
            .filter(|post| self.matches(post, &needle))
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.page
            .items
            .iter()
            .filter(|post| post.is_read == Some(false))
            .count()
    }

    /// Marks the post read locally and tells the server. The server call's
    /// outcome does not change the local state. Returns false for a post
    /// that is not on this page.
    pub async fn mark_read<A: DrugAlertApi>(&mut self, api: &A, token: &str, post_id: i32) -> bool {
        let Some(post) = self.page.items.iter_mut().find(|p| p.id == post_id) else {
            return false;
        };
        post.is_read = Some(true);

        if let Err(e) = api.mark_read(token, post_id).await {
            warn!(post_id, error = %e, "Failed to record read state");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake_api::{api_error, feed_post, FakeApi};

    fn feed() -> PostFeed {
        PostFeed::new(FeedPage {
            items: vec![
                feed_post(1, "Ανάκληση παρτίδας Depon", 10),
                feed_post(2, "Έλλειψη φαρμάκου", 11),
                feed_post(3, "Νέα εγκύκλιος για DEPON", 11),
            ],
            total: 3,
            skip: 0,
            limit: 20,
        })
    }

    fn ids(posts: Vec<&FeedPost>) -> Vec<i32> {
        posts.into_iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn load_wraps_the_fetched_page() {
        let api = FakeApi {
            posts: Ok(feed().page),
            ..Default::default()
        };

        let loaded = PostFeed::load(&api, None, &PostsQuery::default()).await.unwrap();
        assert_eq!(loaded.total(), 3);
        assert_eq!(api.calls(), vec!["posts"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut feed = feed();
        feed.set_search("depon");
        assert_eq!(ids(feed.visible()), vec![1, 3]);
    }

    #[test]
    fn search_looks_into_content() {
        let mut feed = feed();
        feed.set_search("ανακοίνωσης 2");
        assert_eq!(ids(feed.visible()), vec![2]);
    }

    #[test]
    fn category_and_search_combine() {
        let mut feed = feed();
        feed.set_category(Some(11));
        assert_eq!(ids(feed.visible()), vec![2, 3]);

        feed.set_search("DEPON");
        assert_eq!(ids(feed.visible()), vec![3]);
    }

    #[tokio::test]
    async fn mark_read_flips_local_state_without_refetch() {
        let api = FakeApi::default();
        let mut feed = feed();

        assert!(feed.mark_read(&api, "token", 2).await);

        assert_eq!(feed.unread_count(), 2);
        assert_eq!(api.calls(), vec!["mark_read 2 token"]);
    }

    #[tokio::test]
    async fn mark_read_keeps_local_state_when_server_fails() {
        let api = FakeApi {
            mark_read: Err(api_error(500, "INTERNAL_ERROR", "boom")),
            ..Default::default()
        };
        let mut feed = feed();

        assert!(feed.mark_read(&api, "token", 1).await);
        assert_eq!(feed.visible()[0].is_read, Some(true));
    }

    #[tokio::test]
    async fn unknown_post_is_ignored() {
        let api = FakeApi::default();
        let mut feed = feed();

        assert!(!feed.mark_read(&api, "token", 99).await);
        assert!(api.calls().is_empty());
    }
}
