use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::announcement::application::domain::entities::ScrapeStatus;
use crate::scraper::application::{
    domain::{
        catalogue::{CategorySpec, CategoryTree},
        scraped::{ScrapeCounts, ScrapeReport},
    },
    ports::outgoing::{PageFetcher, ScrapeStore},
    services::{pagination_urls, parse_post_content, parse_post_list},
};

#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub base_url: String,
    /// Listing pages per category, first page included.
    pub max_pages: usize,
    pub page_delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunScrapeError {
    #[error("Could not record scrape run: {0}")]
    StoreError(String),
}

#[async_trait]
pub trait IRunScrapeUseCase: Send + Sync {
    /// Walks the whole catalogue once and records the run in the scrape log.
    async fn execute(&self) -> Result<ScrapeReport, RunScrapeError>;
}

pub struct RunScrapeUseCase<F, S>
where
    F: PageFetcher,
    S: ScrapeStore,
{
    fetcher: F,
    store: S,
    settings: ScrapeSettings,
    catalogue: &'static [CategoryTree],
}

/// Per-category tally kept by a run.
#[derive(Default)]
struct RunTally {
    counts: ScrapeCounts,
    errors: Vec<String>,
    attempted: usize,
    failed: usize,
}

impl RunTally {
    fn status(&self) -> ScrapeStatus {
        if self.errors.is_empty() {
            ScrapeStatus::Success
        } else if self.attempted > 0 && self.failed == self.attempted {
            ScrapeStatus::Failed
        } else {
            ScrapeStatus::Partial
        }
    }
}

impl<F, S> RunScrapeUseCase<F, S>
where
    F: PageFetcher,
    S: ScrapeStore,
{
    pub fn new(
        fetcher: F,
        store: S,
        settings: ScrapeSettings,
        catalogue: &'static [CategoryTree],
    ) -> Self {
        Self {
            fetcher,
            store,
            settings,
            catalogue,
        }
    }

    async fn scrape_category(
        &self,
        spec: &CategorySpec,
        parent_id: Option<i32>,
        tally: &mut RunTally,
    ) -> Option<i32> {
        tally.attempted += 1;

        let url = spec.url(&self.settings.base_url);
        let category_id = match self.store.upsert_category(spec, &url, parent_id).await {
            Ok(id) => id,
            Err(e) => {
                tally.failed += 1;
                tally.errors.push(format!("Category {}: {e}", spec.slug));
                return None;
            }
        };

        match self.scrape_listing(category_id, &url, tally).await {
            Ok(counts) => {
                info!(
                    category = spec.slug,
                    scraped = counts.scraped,
                    new = counts.new,
                    updated = counts.updated,
                    "Category scraped"
                );
                tally.counts.add(counts);
            }
            Err(e) => {
                warn!(category = spec.slug, error = %format!("{e:#}"), "Category scrape failed");
                tally.failed += 1;
                tally.errors.push(format!("Category {}: {e:#}", spec.slug));
            }
        }

        Some(category_id)
    }

    /// Every listing page of one category. Fails only when the first page
    /// cannot be fetched; later pages and single posts are counted instead.
    async fn scrape_listing(
        &self,
        category_id: i32,
        url: &str,
        tally: &mut RunTally,
    ) -> anyhow::Result<ScrapeCounts> {
        let base = &self.settings.base_url;
        let first_page = self
            .fetcher
            .fetch(url)
            .await
            .with_context(|| format!("listing page {url}"))?;

        let extra_pages: Vec<String> = pagination_urls(&first_page, base)
            .into_iter()
            .filter(|page| page.trim_end_matches('/') != url.trim_end_matches('/'))
            .take(self.settings.max_pages.saturating_sub(1))
            .collect();

        let mut counts = ScrapeCounts::default();
        self.scrape_page(category_id, &first_page, &mut counts, tally).await;

        for page_url in extra_pages {
            tokio::time::sleep(self.settings.page_delay).await;
            match self.fetcher.fetch(&page_url).await {
                Ok(html) => self.scrape_page(category_id, &html, &mut counts, tally).await,
                Err(e) => tally.errors.push(format!("Listing page {page_url}: {e}")),
            }
        }

        Ok(counts)
    }

    async fn scrape_page(
        &self,
        category_id: i32,
        html: &str,
        counts: &mut ScrapeCounts,
        tally: &mut RunTally,
    ) {
        for listed in parse_post_list(html, &self.settings.base_url) {
            let page = match self.fetcher.fetch(&listed.url).await {
                Ok(page) => page,
                Err(e) => {
                    counts.record(None);
                    tally.errors.push(format!("Post {}: {e}", listed.url));
                    continue;
                }
            };

            let content = parse_post_content(&page, &self.settings.base_url);
            match self.store.upsert_post(category_id, &listed, &content).await {
                Ok(outcome) => counts.record(Some(outcome)),
                Err(e) => {
                    counts.record(None);
                    tally.errors.push(format!("Post {}: {e}", listed.url));
                }
            }
        }
    }
}

#[async_trait]
impl<F, S> IRunScrapeUseCase for RunScrapeUseCase<F, S>
where
    F: PageFetcher,
    S: ScrapeStore,
{
    async fn execute(&self) -> Result<ScrapeReport, RunScrapeError> {
        let started_at = Utc::now();
        let log_id = self
            .store
            .start_run(started_at)
            .await
            .map_err(|e| RunScrapeError::StoreError(e.to_string()))?;

        info!(log_id, "Scrape run started");

        let mut tally = RunTally::default();
        for tree in self.catalogue {
            let Some(parent_id) = self.scrape_category(&tree.parent, None, &mut tally).await else {
                // Children need the parent row.
                continue;
            };
            for child in tree.children {
                self.scrape_category(child, Some(parent_id), &mut tally).await;
            }
        }

        let report = ScrapeReport {
            log_id,
            status: tally.status(),
            counts: tally.counts,
            errors: tally.errors,
            started_at,
            finished_at: Utc::now(),
        };

        if let Err(e) = self.store.finish_run(&report).await {
            error!(log_id, error = %e, "Failed to close scrape log");
            return Err(RunScrapeError::StoreError(e.to_string()));
        }

        info!(
            log_id,
            status = report.status.as_str(),
            scraped = report.counts.scraped,
            new = report.counts.new,
            updated = report.counts.updated,
            errors = report.errors.len(),
            duration_seconds = report.duration_seconds(),
            "Scrape run finished"
        );

        Ok(report)
    }
}
