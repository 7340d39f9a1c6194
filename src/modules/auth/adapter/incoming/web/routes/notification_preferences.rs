use actix_web::{put, web, Responder};
use tracing::error;

use super::dto::UserProfileResponse;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::domain::entities::NotificationPreferences;
use crate::auth::application::use_cases::update_notification_preferences::UpdatePreferencesError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Notification preferences
///
/// Push and SMS can only be switched on while the trial or a subscription
/// is running. Switching anything off is always allowed.
#[utoipa::path(
    put,
    path = "/api/auth/notification-preferences",
    tag = "auth",
    security(("BearerAuth" = [])),
    request_body = NotificationPreferences,
    responses(
        (status = 200, description = "Preferences saved", body = inline(SuccessResponse<UserProfileResponse>)),
        (
            status = 403,
            description = "Premium channel requested without premium access",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "PREMIUM_REQUIRED", "message": "Push and SMS notifications require an active trial or subscription" }
            })
        ),
    )
)]
#[put("/api/auth/notification-preferences")]
pub async fn update_notification_preferences_handler(
    user: AuthenticatedUser,
    req: web::Json<NotificationPreferences>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .auth
        .update_preferences
        .execute(user.user_id, req.into_inner())
        .await
    {
        Ok(account) => ApiResponse::success(UserProfileResponse::from(account)),
        Err(e @ UpdatePreferencesError::PremiumRequired) => {
            ApiResponse::forbidden("PREMIUM_REQUIRED", &e.to_string())
        }
        Err(UpdatePreferencesError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(UpdatePreferencesError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Saving notification preferences failed");
            ApiResponse::internal_error()
        }
    }
}
