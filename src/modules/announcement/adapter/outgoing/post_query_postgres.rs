use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    sea_query::{Expr, LikeExpr}, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::sea_orm_entity::{attachments, categories, posts, scrape_logs};
use crate::announcement::application::domain::entities::{
    Attachment, LastScrape, Post, PostFilter, PostListing, PostSort, ScrapeStatus, SiteStats,
    SortOrder,
};
use crate::announcement::application::ports::outgoing::{PostQuery, PostQueryError};

#[derive(Clone, Debug)]
pub struct PostQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PostQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> PostQueryError {
    PostQueryError::DatabaseError(e.to_string())
}

fn active_posts() -> Select<posts::Entity> {
    posts::Entity::find().filter(posts::Column::IsActive.eq(true))
}

/// `%text%` with the LIKE wildcards in `text` matched literally.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn apply_filter(mut query: Select<posts::Entity>, filter: &PostFilter) -> Select<posts::Entity> {
    if let Some(category_id) = filter.category_id {
        query = query.filter(posts::Column::CategoryId.eq(category_id));
    }

    if let Some(ref search) = filter.search {
        let pattern = contains_pattern(search.trim());
        query = query.filter(
            Condition::any()
                .add(Expr::col(posts::Column::Title).ilike(LikeExpr::new(pattern.clone()).escape('\\')))
                .add(Expr::col(posts::Column::Content).ilike(LikeExpr::new(pattern).escape('\\'))),
        );
    }

    query
}

fn apply_sort(query: Select<posts::Entity>, sort: PostSort, order: SortOrder) -> Select<posts::Entity> {
    let column = match sort {
        PostSort::PublishDate => posts::Column::PublishDate,
        PostSort::Title => posts::Column::Title,
        PostSort::ScrapedAt => posts::Column::ScrapedAt,
    };

    // Id breaks ties so pages stay stable.
    match order {
        SortOrder::Asc => query.order_by_asc(column).order_by_asc(posts::Column::Id),
        SortOrder::Desc => query.order_by_desc(column).order_by_desc(posts::Column::Id),
    }
}

impl PostQueryPostgres {
    /// Attaches category names and attachments, two queries per batch.
    async fn hydrate(&self, models: Vec<posts::Model>) -> Result<Vec<Post>, PostQueryError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let mut category_ids: Vec<i32> = models.iter().filter_map(|m| m.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        let category_names: HashMap<i32, String> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            categories::Entity::find()
                .filter(categories::Column::Id.is_in(category_ids))
                .all(&*self.db)
                .await
                .map_err(map_db_err)?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect()
        };

        let post_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut attachments_by_post: HashMap<i32, Vec<Attachment>> = HashMap::new();
        for attachment in attachments::Entity::find()
            .filter(attachments::Column::PostId.is_in(post_ids))
            .order_by_asc(attachments::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
        {
            attachments_by_post
                .entry(attachment.post_id)
                .or_default()
                .push(attachment.into());
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let category_name = model
                    .category_id
                    .and_then(|id| category_names.get(&id).cloned());
                let attachments = attachments_by_post.remove(&model.id).unwrap_or_default();
                model.into_post(category_name, attachments)
            })
            .collect())
    }
}

#[async_trait]
impl PostQuery for PostQueryPostgres {
    async fn list(
        &self,
        filter: &PostFilter,
        listing: PostListing,
    ) -> Result<(Vec<Post>, u64), PostQueryError> {
        let query = apply_filter(active_posts(), filter);

        let total = query.clone().count(&*self.db).await.map_err(map_db_err)?;

        let models = apply_sort(query, listing.sort, listing.order)
            .offset(listing.skip)
            .limit(listing.limit)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok((self.hydrate(models).await?, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, PostQueryError> {
        let model = active_posts()
            .filter(posts::Column::Id.eq(id))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        match model {
            Some(model) => Ok(self.hydrate(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn count_active(&self) -> Result<u64, PostQueryError> {
        active_posts().count(&*self.db).await.map_err(map_db_err)
    }

    async fn site_stats(&self, since: DateTime<Utc>) -> Result<SiteStats, PostQueryError> {
        let db = &*self.db;

        let total_posts = active_posts().count(db).await.map_err(map_db_err)?;
        let total_categories = categories::Entity::find()
            .count(db)
            .await
            .map_err(map_db_err)?;
        let total_attachments = attachments::Entity::find()
            .count(db)
            .await
            .map_err(map_db_err)?;
        let posts_last_7_days = active_posts()
            .filter(posts::Column::ScrapedAt.gte(since))
            .count(db)
            .await
            .map_err(map_db_err)?;

        let last_successful_scrape = scrape_logs::Entity::find()
            .filter(scrape_logs::Column::Status.eq(ScrapeStatus::Success.as_str()))
            .order_by_desc(scrape_logs::Column::StartTime)
            .one(db)
            .await
            .map_err(map_db_err)?
            .map(|log| LastScrape {
                end_time: log.end_time.map(|d| d.to_utc()),
                posts_scraped: log.posts_scraped,
            });

        Ok(SiteStats {
            total_posts,
            total_categories,
            total_attachments,
            posts_last_7_days,
            last_successful_scrape,
        })
    }
}
