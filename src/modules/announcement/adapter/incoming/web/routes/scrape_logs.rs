use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;

use crate::announcement::application::domain::entities::{ScrapeLogEntry, ScrapeStatus};
use crate::announcement::application::use_cases::list_scrape_logs::ListScrapeLogsError;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::shared::api::pagination::{limit_error_response, LimitRange};
use crate::shared::api::ApiResponse;
use crate::AppState;

pub const SCRAPE_LOGS_LIMIT: LimitRange = LimitRange::new(20, 1, 100);

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScrapeLogsQuery {
    #[param(inline)]
    pub status: Option<ScrapeStatus>,
    /// 1..=100, default 20.
    pub limit: Option<u64>,
}

/// Scraper run history
///
/// Newest run first.
#[utoipa::path(
    get,
    path = "/api/scrape-logs",
    tag = "announcements",
    params(ScrapeLogsQuery),
    responses(
        (status = 200, description = "Runs", body = inline(SuccessResponse<Vec<ScrapeLogEntry>>)),
        (status = 400, description = "Invalid limit", body = ErrorResponse),
    )
)]
#[get("/api/scrape-logs")]
pub async fn scrape_logs_handler(
    query: web::Query<ScrapeLogsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let limit = match SCRAPE_LOGS_LIMIT.resolve(query.limit) {
        Ok(limit) => limit,
        Err(e) => return limit_error_response(e),
    };

    match data.announcement.scrape_logs.execute(query.status, limit).await {
        Ok(logs) => ApiResponse::success(logs),
        Err(ListScrapeLogsError::QueryError(e)) => {
            error!(error = %e, "Failed to list scrape logs");
            ApiResponse::internal_error()
        }
    }
}
