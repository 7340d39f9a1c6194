use actix_web::{get, web, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::announcement::application::domain::entities::{Category, Post};
use crate::announcement::application::use_cases::get_dashboard::{Dashboard, GetDashboardError};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::adapter::incoming::web::routes::dto::UserProfileResponse;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub user: UserProfileResponse,
    pub total_posts: u64,
    pub unread_posts: u64,
    pub categories: Vec<Category>,
    pub recent_posts: Vec<Post>,
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            user: dashboard.user.into(),
            total_posts: dashboard.total_posts,
            unread_posts: dashboard.unread_posts,
            categories: dashboard.categories,
            recent_posts: dashboard.recent_posts,
        }
    }
}

/// User dashboard
///
/// Profile, unread count, categories with counts and the ten newest posts.
#[utoipa::path(
    get,
    path = "/api/user/dashboard",
    tag = "announcements",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Dashboard", body = inline(SuccessResponse<DashboardResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
    )
)]
#[get("/api/user/dashboard")]
pub async fn dashboard_handler(user: AuthenticatedUser, data: web::Data<AppState>) -> impl Responder {
    match data.announcement.dashboard.execute(user.user_id).await {
        Ok(dashboard) => ApiResponse::success(DashboardResponse::from(dashboard)),
        Err(GetDashboardError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(GetDashboardError::QueryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to build dashboard");
            ApiResponse::internal_error()
        }
    }
}
