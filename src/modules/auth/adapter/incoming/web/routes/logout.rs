use actix_web::{post, web, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::use_cases::logout_user::LogoutRequest;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct LogoutResponse {
    #[schema(example = "Logged out successfully")]
    pub message: String,
}

/// Log out
///
/// Revokes the presented bearer token. The client should discard it either way.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Logged out", body = inline(SuccessResponse<LogoutResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[post("/api/auth/logout")]
pub async fn logout_handler(user: AuthenticatedUser, data: web::Data<AppState>) -> impl Responder {
    let request = LogoutRequest {
        user_id: user.user_id,
        access_token: user.token,
    };

    if let Err(e) = data.auth.logout.execute(request).await {
        // The token still expires on its own.
        error!(user_id = %user.user_id, error = %e, "Token revocation failed during logout");
    }

    ApiResponse::success(LogoutResponse {
        message: "Logged out successfully".to_string(),
    })
}
