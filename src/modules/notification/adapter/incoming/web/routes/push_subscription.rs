use actix_web::{delete, post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::notification::application::domain::entities::PushSubscription;
use crate::notification::application::use_cases::subscribe_push::SubscribePushError;
use crate::notification::application::use_cases::unsubscribe_push::UnsubscribePushError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubscribePushRequest {
    pub subscription: PushSubscription,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubscribePushResponse {
    pub push_notifications: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnsubscribePushResponse {
    pub push_notifications: bool,
    pub removed: u64,
}

/// Register a browser push subscription
///
/// Sending the same endpoint again refreshes its keys.
#[utoipa::path(
    post,
    path = "/api/auth/push-subscription",
    tag = "notifications",
    security(("BearerAuth" = [])),
    request_body = SubscribePushRequest,
    responses(
        (status = 200, description = "Stored", body = inline(SuccessResponse<SubscribePushResponse>)),
        (status = 400, description = "Malformed subscription", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "No active trial or subscription", body = ErrorResponse),
    )
)]
#[post("/api/auth/push-subscription")]
pub async fn subscribe_push_handler(
    user: AuthenticatedUser,
    req: web::Json<SubscribePushRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let subscription = req.into_inner().subscription;

    match data
        .notification
        .subscribe
        .execute(user.user_id, subscription)
        .await
    {
        Ok(()) => ApiResponse::success(SubscribePushResponse {
            push_notifications: true,
        }),
        Err(SubscribePushError::InvalidSubscription(msg)) => {
            ApiResponse::bad_request("INVALID_SUBSCRIPTION", &msg)
        }
        Err(e @ SubscribePushError::PremiumRequired) => {
            ApiResponse::forbidden("PREMIUM_REQUIRED", &e.to_string())
        }
        Err(SubscribePushError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(SubscribePushError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to store push subscription");
            ApiResponse::internal_error()
        }
    }
}

/// Remove all push subscriptions
#[utoipa::path(
    delete,
    path = "/api/auth/push-subscription",
    tag = "notifications",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Removed", body = inline(SuccessResponse<UnsubscribePushResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[delete("/api/auth/push-subscription")]
pub async fn unsubscribe_push_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.notification.unsubscribe.execute(user.user_id).await {
        Ok(removed) => ApiResponse::success(UnsubscribePushResponse {
            push_notifications: false,
            removed,
        }),
        Err(UnsubscribePushError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to remove push subscriptions");
            ApiResponse::internal_error()
        }
    }
}
