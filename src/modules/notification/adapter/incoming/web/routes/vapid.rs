use actix_web::{get, web, Responder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct VapidPublicKeyResponse {
    /// base64url, uncompressed P-256 point.
    pub public_key: String,
}

/// VAPID public key for `PushManager.subscribe`
#[utoipa::path(
    get,
    path = "/api/push/vapid-public-key",
    tag = "notifications",
    responses(
        (status = 200, description = "Key", body = inline(SuccessResponse<VapidPublicKeyResponse>)),
        (status = 404, description = "Push is not configured", body = ErrorResponse),
    )
)]
#[get("/api/push/vapid-public-key")]
pub async fn vapid_public_key_handler(data: web::Data<AppState>) -> impl Responder {
    match &data.notification.vapid.public_key {
        Some(key) => ApiResponse::success(VapidPublicKeyResponse {
            public_key: key.clone(),
        }),
        None => ApiResponse::not_found("PUSH_NOT_CONFIGURED", "Push notifications are not configured"),
    }
}
