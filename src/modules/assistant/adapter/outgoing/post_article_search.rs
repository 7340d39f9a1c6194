use async_trait::async_trait;

use crate::announcement::application::domain::entities::{
    Post, PostFilter, PostListing, PostSort, SortOrder,
};
use crate::announcement::application::ports::outgoing::PostQuery;
use crate::assistant::application::ports::outgoing::{ArticleSearch, ArticleSearchError};

/// Article search on top of the announcement read model.
#[derive(Clone, Debug)]
pub struct PostArticleSearch<Q>
where
    Q: PostQuery,
{
    query: Q,
}

impl<Q> PostArticleSearch<Q>
where
    Q: PostQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ArticleSearch for PostArticleSearch<Q>
where
    Q: PostQuery,
{
    async fn search(&self, term: &str, limit: u64) -> Result<Vec<Post>, ArticleSearchError> {
        let filter = PostFilter {
            category_id: None,
            search: Some(term.to_string()),
        };
        let listing = PostListing {
            sort: PostSort::PublishDate,
            order: SortOrder::Desc,
            skip: 0,
            limit,
        };

        self.query
            .list(&filter, listing)
            .await
            .map(|(posts, _total)| posts)
            .map_err(|e| ArticleSearchError::SearchFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcement::application::domain::entities::SiteStats;
    use crate::announcement::application::ports::outgoing::PostQueryError;
    use crate::tests::support::fixtures::sample_post;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingQuery {
        seen: Mutex<Option<(PostFilter, PostListing)>>,
    }

    #[async_trait]
    impl PostQuery for CapturingQuery {
        async fn list(
            &self,
            filter: &PostFilter,
            listing: PostListing,
        ) -> Result<(Vec<Post>, u64), PostQueryError> {
            *self.seen.lock().unwrap() = Some((filter.clone(), listing));
            Ok((vec![sample_post(4)], 17))
        }

        async fn find_by_id(&self, _id: i32) -> Result<Option<Post>, PostQueryError> {
            unimplemented!("Not used in this test")
        }

        async fn count_active(&self) -> Result<u64, PostQueryError> {
            unimplemented!("Not used in this test")
        }

        async fn site_stats(&self, _since: DateTime<Utc>) -> Result<SiteStats, PostQueryError> {
            unimplemented!("Not used in this test")
        }
    }

    #[tokio::test]
    async fn searches_newest_first_with_limit() {
        let search = PostArticleSearch::new(CapturingQuery::default());

        let posts = search.search("Depon", 5).await.unwrap();
        assert_eq!(posts.len(), 1);

        let (filter, listing) = search.query.seen.lock().unwrap().clone().unwrap();
        assert_eq!(filter.search.as_deref(), Some("Depon"));
        assert_eq!(filter.category_id, None);
        assert_eq!(listing.sort, PostSort::PublishDate);
        assert_eq!(listing.order, SortOrder::Desc);
        assert_eq!(listing.limit, 5);
    }
}
