use actix_web::{get, web, Responder};
use tracing::error;

use crate::announcement::application::domain::entities::SiteStats;
use crate::announcement::application::use_cases::get_stats::GetStatsError;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Site statistics
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "announcements",
    responses(
        (status = 200, description = "Counts and last successful scrape", body = inline(SuccessResponse<SiteStats>)),
        (status = 500, description = "Internal error", body = ErrorResponse),
    )
)]
#[get("/api/stats")]
pub async fn stats_handler(data: web::Data<AppState>) -> impl Responder {
    match data.announcement.stats.execute().await {
        Ok(stats) => ApiResponse::success(stats),
        Err(GetStatsError::QueryError(e)) => {
            error!(error = %e, "Failed to compute stats");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcement::application::use_cases::get_stats::IGetStatsUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct FailingStats;

    #[async_trait]
    impl IGetStatsUseCase for FailingStats {
        async fn execute(&self) -> Result<SiteStats, GetStatsError> {
            Err(GetStatsError::QueryError("connection reset".into()))
        }
    }

    struct FixedStats;

    #[async_trait]
    impl IGetStatsUseCase for FixedStats {
        async fn execute(&self) -> Result<SiteStats, GetStatsError> {
            Ok(SiteStats {
                total_posts: 1200,
                total_categories: 9,
                total_attachments: 310,
                posts_last_7_days: 14,
                last_successful_scrape: None,
            })
        }
    }

    #[actix_web::test]
    async fn test_stats_success() {
        let app_state = TestAppStateBuilder::default().with_stats(FixedStats).build();
        let app = test::init_service(App::new().app_data(app_state).service(stats_handler)).await;

        let req = test::TestRequest::get().uri("/api/stats").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["total_posts"], 1200);
        assert_eq!(body["data"]["posts_last_7_days"], 14);
        assert!(body["data"]["last_successful_scrape"].is_null());
    }

    #[actix_web::test]
    async fn test_stats_failure_is_internal_error() {
        let app_state = TestAppStateBuilder::default().with_stats(FailingStats).build();
        let app = test::init_service(App::new().app_data(app_state).service(stats_handler)).await;

        let req = test::TestRequest::get().uri("/api/stats").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);
    }
}
