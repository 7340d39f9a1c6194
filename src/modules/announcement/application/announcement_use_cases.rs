use std::sync::Arc;

use crate::announcement::application::use_cases::{
    get_category::IGetCategoryUseCase, get_dashboard::IGetDashboardUseCase,
    get_post::IGetPostUseCase, get_stats::IGetStatsUseCase,
    list_categories::IListCategoriesUseCase, list_posts::IListPostsUseCase,
    list_scrape_logs::IListScrapeLogsUseCase, mark_post_read::IMarkPostReadUseCase,
    recent_posts::IRecentPostsUseCase,
};

#[derive(Clone)]
pub struct AnnouncementUseCases {
    pub list_categories: Arc<dyn IListCategoriesUseCase + Send + Sync>,
    pub get_category: Arc<dyn IGetCategoryUseCase + Send + Sync>,
    pub list_posts: Arc<dyn IListPostsUseCase + Send + Sync>,
    pub recent_posts: Arc<dyn IRecentPostsUseCase + Send + Sync>,
    pub get_post: Arc<dyn IGetPostUseCase + Send + Sync>,
    pub mark_read: Arc<dyn IMarkPostReadUseCase + Send + Sync>,
    pub dashboard: Arc<dyn IGetDashboardUseCase + Send + Sync>,
    pub stats: Arc<dyn IGetStatsUseCase + Send + Sync>,
    pub scrape_logs: Arc<dyn IListScrapeLogsUseCase + Send + Sync>,
}
