use actix_web::{post, web, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::announcement::application::use_cases::mark_post_read::MarkPostReadError;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkReadResponse {
    pub post_id: i32,
    pub is_read: bool,
}

/// Mark announcement as read
///
/// Marking an already read post again is a no-op.
#[utoipa::path(
    post,
    path = "/api/auth/posts/{id}/mark-read",
    tag = "announcements",
    security(("BearerAuth" = [])),
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Marked", body = inline(SuccessResponse<MarkReadResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Unknown post", body = ErrorResponse),
    )
)]
#[post("/api/auth/posts/{id}/mark-read")]
pub async fn mark_read_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> impl Responder {
    let post_id = path.into_inner();

    match data.announcement.mark_read.execute(user.user_id, post_id).await {
        Ok(()) => ApiResponse::success(MarkReadResponse {
            post_id,
            is_read: true,
        }),
        Err(MarkPostReadError::PostNotFound) => {
            ApiResponse::not_found("POST_NOT_FOUND", "Post not found")
        }
        Err(MarkPostReadError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, post_id, error = %e, "Failed to mark post as read");
            ApiResponse::internal_error()
        }
    }
}
