use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    TransactionTrait,
};
use std::sync::Arc;

use crate::announcement::adapter::outgoing::sea_orm_entity::{
    attachments, categories, posts, scrape_logs,
};
use crate::announcement::application::domain::entities::ScrapeStatus;
use crate::scraper::application::domain::{
    catalogue::{CategorySpec, PARENT_CATEGORY_TYPE, SUBCATEGORY_TYPE},
    scraped::{ListedPost, PostContent, ScrapeReport, ScrapedAttachment, UpsertOutcome},
};
use crate::scraper::application::ports::outgoing::{ScrapeStore, ScrapeStoreError};

#[derive(Clone, Debug)]
pub struct ScrapeStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl ScrapeStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_db_err(e: DbErr) -> ScrapeStoreError {
        ScrapeStoreError::DatabaseError(e.to_string())
    }

    async fn replace_attachments(
        txn: &DatabaseTransaction,
        post_id: i32,
        attachments: &[ScrapedAttachment],
    ) -> Result<(), DbErr> {
        attachments::Entity::delete_many()
            .filter(attachments::Column::PostId.eq(post_id))
            .exec(txn)
            .await?;

        if attachments.is_empty() {
            return Ok(());
        }

        let rows = attachments.iter().map(|a| attachments::ActiveModel {
            id: NotSet,
            post_id: Set(post_id),
            file_url: Set(a.file_url.clone()),
            file_name: Set(Some(a.file_name.clone())),
            file_type: Set(Some(a.file_type.clone())),
            file_size: Set(None),
        });

        attachments::Entity::insert_many(rows)
            .exec_without_returning(txn)
            .await
            .map(|_| ())
    }

    async fn write_post(
        txn: &DatabaseTransaction,
        category_id: i32,
        listed: &ListedPost,
        content: &PostContent,
    ) -> Result<UpsertOutcome, DbErr> {
        let now = Utc::now().fixed_offset();
        let existing = posts::Entity::find()
            .filter(posts::Column::Url.eq(listed.url.as_str()))
            .one(txn)
            .await?;

        let (post_id, outcome) = match existing {
            Some(post) => {
                posts::Entity::update_many()
                    .col_expr(posts::Column::Title, Expr::value(listed.title.clone()))
                    .col_expr(posts::Column::Content, Expr::value(content.content.clone()))
                    .col_expr(posts::Column::Excerpt, Expr::value(listed.excerpt.clone()))
                    .col_expr(
                        posts::Column::MetaDescription,
                        Expr::value(content.meta_description.clone()),
                    )
                    .col_expr(posts::Column::Tags, Expr::value(posts::tags_to_json(&content.tags)))
                    .col_expr(posts::Column::LastModified, Expr::value(now))
                    .filter(posts::Column::Id.eq(post.id))
                    .exec(txn)
                    .await?;
                (post.id, UpsertOutcome::Updated)
            }
            None => {
                let inserted = posts::Entity::insert(posts::ActiveModel {
                    id: NotSet,
                    title: Set(listed.title.clone()),
                    url: Set(listed.url.clone()),
                    content: Set(content.content.clone()),
                    excerpt: Set(listed.excerpt.clone()),
                    category_id: Set(Some(category_id)),
                    publish_date: Set(listed.publish_date.map(|d| d.fixed_offset())),
                    author: Set(None),
                    meta_description: Set(content.meta_description.clone()),
                    tags: Set(posts::tags_to_json(&content.tags)),
                    is_active: Set(true),
                    scraped_at: Set(now),
                    last_modified: Set(None),
                })
                .exec_with_returning(txn)
                .await?;
                (inserted.id, UpsertOutcome::New)
            }
        };

        Self::replace_attachments(txn, post_id, &content.attachments).await?;
        Ok(outcome)
    }
}

#[async_trait]
impl ScrapeStore for ScrapeStorePostgres {
    async fn upsert_category(
        &self,
        spec: &CategorySpec,
        url: &str,
        parent_id: Option<i32>,
    ) -> Result<i32, ScrapeStoreError> {
        let category_type = match parent_id {
            Some(_) => SUBCATEGORY_TYPE,
            None => PARENT_CATEGORY_TYPE,
        };

        let model = categories::Entity::insert(categories::ActiveModel {
            id: NotSet,
            name: Set(spec.name.to_string()),
            slug: Set(spec.slug.to_string()),
            url: Set(url.to_string()),
            parent_id: Set(parent_id),
            category_type: Set(Some(category_type.to_string())),
            created_at: Set(Utc::now().fixed_offset()),
        })
        .on_conflict(
            OnConflict::column(categories::Column::Slug)
                .update_columns([
                    categories::Column::Name,
                    categories::Column::Url,
                    categories::Column::ParentId,
                    categories::Column::CategoryType,
                ])
                .to_owned(),
        )
        .exec_with_returning(&*self.db)
        .await
        .map_err(Self::map_db_err)?;

        Ok(model.id)
    }

    async fn upsert_post(
        &self,
        category_id: i32,
        listed: &ListedPost,
        content: &PostContent,
    ) -> Result<UpsertOutcome, ScrapeStoreError> {
        let txn = self.db.begin().await.map_err(Self::map_db_err)?;

        match Self::write_post(&txn, category_id, listed, content).await {
            Ok(outcome) => {
                txn.commit().await.map_err(Self::map_db_err)?;
                Ok(outcome)
            }
            Err(e) => {
                let _ = txn.rollback().await;
                Err(Self::map_db_err(e))
            }
        }
    }

    async fn start_run(&self, started_at: DateTime<Utc>) -> Result<i32, ScrapeStoreError> {
        let model = scrape_logs::Entity::insert(scrape_logs::ActiveModel {
            id: NotSet,
            start_time: Set(started_at.fixed_offset()),
            end_time: Set(None),
            status: Set(ScrapeStatus::Running.as_str().to_string()),
            posts_scraped: Set(0),
            posts_new: Set(0),
            posts_updated: Set(0),
            errors: Set(None),
            duration_seconds: Set(None),
        })
        .exec_with_returning(&*self.db)
        .await
        .map_err(Self::map_db_err)?;

        Ok(model.id)
    }

    async fn finish_run(&self, report: &ScrapeReport) -> Result<(), ScrapeStoreError> {
        let result = scrape_logs::Entity::update_many()
            .col_expr(
                scrape_logs::Column::EndTime,
                Expr::value(report.finished_at.fixed_offset()),
            )
            .col_expr(scrape_logs::Column::Status, Expr::value(report.status.as_str()))
            .col_expr(scrape_logs::Column::PostsScraped, Expr::value(report.counts.scraped))
            .col_expr(scrape_logs::Column::PostsNew, Expr::value(report.counts.new))
            .col_expr(scrape_logs::Column::PostsUpdated, Expr::value(report.counts.updated))
            .col_expr(scrape_logs::Column::Errors, Expr::value(report.errors_text()))
            .col_expr(
                scrape_logs::Column::DurationSeconds,
                Expr::value(report.duration_seconds()),
            )
            .filter(scrape_logs::Column::Id.eq(report.log_id))
            .exec(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        if result.rows_affected == 0 {
            return Err(ScrapeStoreError::DatabaseError(format!(
                "scrape log {} not found",
                report.log_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::application::domain::scraped::ScrapeCounts;
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn ok_exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    fn listed() -> ListedPost {
        ListedPost {
            url: "https://www.eof.gr/anakoinosi-7/".into(),
            title: "Ανάκληση παρτίδας 7".into(),
            excerpt: Some("Περίληψη".into()),
            publish_date: Some(Utc::now()),
        }
    }

    fn content_with_pdf() -> PostContent {
        PostContent {
            content: Some("Κείμενο".into()),
            attachments: vec![ScrapedAttachment {
                file_url: "https://www.eof.gr/wp-content/uploads/anakoinosi.pdf".into(),
                file_name: "Ανακοίνωση".into(),
                file_type: "pdf".into(),
            }],
            meta_description: None,
            tags: vec!["ανάκληση".into()],
        }
    }

    fn category(id: i32) -> categories::Model {
        categories::Model {
            id,
            name: "Ανακλήσεις".into(),
            slug: "anakliseis".into(),
            url: "https://www.eof.gr/category/farmaka/anakliseis/".into(),
            parent_id: Some(1),
            category_type: Some(SUBCATEGORY_TYPE.into()),
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[tokio::test]
    async fn category_upsert_returns_row_id() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![category(9)]])
                .into_connection(),
        );
        let store = ScrapeStorePostgres::new(db.clone());
        let spec = CategorySpec {
            slug: "anakliseis",
            name: "Ανακλήσεις",
            path: "/category/farmaka/anakliseis/",
        };

        let id = store
            .upsert_category(&spec, "https://www.eof.gr/category/farmaka/anakliseis/", Some(1))
            .await
            .unwrap();
        assert_eq!(id, 9);

        drop(store);
        let log = format!(
            "{:?}",
            Arc::try_unwrap(db).unwrap().into_transaction_log()
        );
        assert!(log.contains("ON CONFLICT"));
        assert!(log.contains("subcategory"));
    }

    #[tokio::test]
    async fn new_post_is_inserted_with_attachments() {
        let mut inserted = posts::sample_model(7);
        inserted.url = listed().url;
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<posts::Model>::new()])
                .append_query_results([vec![inserted]])
                .append_exec_results([ok_exec(0), ok_exec(1)])
                .into_connection(),
        );
        let store = ScrapeStorePostgres::new(db.clone());

        let outcome = store.upsert_post(2, &listed(), &content_with_pdf()).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::New);

        drop(store);
        let log = format!(
            "{:?}",
            Arc::try_unwrap(db).unwrap().into_transaction_log()
        );
        assert!(log.contains("INSERT INTO"));
        assert!(log.contains("attachments"));
        assert!(log.contains("anakoinosi.pdf"));
    }

    #[tokio::test]
    async fn known_post_is_updated() {
        let existing = posts::sample_model(7);
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![existing]])
                .append_exec_results([ok_exec(1), ok_exec(2)])
                .into_connection(),
        );
        let store = ScrapeStorePostgres::new(db.clone());
        let content = PostContent {
            attachments: vec![],
            ..content_with_pdf()
        };

        let outcome = store.upsert_post(2, &listed(), &content).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);

        drop(store);
        let log = format!(
            "{:?}",
            Arc::try_unwrap(db).unwrap().into_transaction_log()
        );
        assert!(log.contains("UPDATE"));
        assert!(log.contains("last_modified"));
        assert!(log.contains("DELETE FROM"));
    }

    #[tokio::test]
    async fn run_is_opened_and_closed() {
        let started_at = Utc::now();
        let opened = scrape_logs::Model {
            id: 31,
            start_time: started_at.fixed_offset(),
            end_time: None,
            status: "running".into(),
            posts_scraped: 0,
            posts_new: 0,
            posts_updated: 0,
            errors: None,
            duration_seconds: None,
        };
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![opened]])
                .append_exec_results([ok_exec(1)])
                .into_connection(),
        );
        let store = ScrapeStorePostgres::new(db.clone());

        let log_id = store.start_run(started_at).await.unwrap();
        assert_eq!(log_id, 31);

        let report = ScrapeReport {
            log_id,
            status: ScrapeStatus::Partial,
            counts: ScrapeCounts {
                scraped: 3,
                new: 1,
                updated: 1,
                failed: 1,
            },
            errors: vec!["Post https://www.eof.gr/x/: HTTP 404".into()],
            started_at,
            finished_at: started_at + Duration::seconds(12),
        };
        store.finish_run(&report).await.unwrap();

        drop(store);
        let log = format!(
            "{:?}",
            Arc::try_unwrap(db).unwrap().into_transaction_log()
        );
        assert!(log.contains("running"));
        assert!(log.contains("partial"));
        assert!(log.contains("HTTP 404"));
    }

    #[tokio::test]
    async fn closing_unknown_run_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([ok_exec(0)])
            .into_connection();
        let store = ScrapeStorePostgres::new(Arc::new(db));
        let now = Utc::now();

        let result = store
            .finish_run(&ScrapeReport {
                log_id: 404,
                status: ScrapeStatus::Success,
                counts: ScrapeCounts::default(),
                errors: vec![],
                started_at: now,
                finished_at: now,
            })
            .await;

        assert!(matches!(result, Err(ScrapeStoreError::DatabaseError(_))));
    }
}
