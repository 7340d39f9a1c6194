use actix_web::{get, http::header, post, web, HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::billing::application::domain::webhook::WebhookEvent;
use crate::billing::application::use_cases::handle_webhook::{
    HandleWebhookError, WebhookOutcome,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Body the provider expects when it verifies the webhook URL.
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookVerificationResponse {
    #[serde(rename = "Key")]
    pub key: String,
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Webhook URL verification
#[utoipa::path(
    get,
    path = "/api/billing/viva/webhook",
    tag = "billing",
    responses(
        (status = 200, description = "Verification key", body = WebhookVerificationResponse),
        (status = 503, description = "Webhook key not configured", body = ErrorResponse),
    )
)]
#[get("/api/billing/viva/webhook")]
pub async fn viva_webhook_verification_handler(data: web::Data<AppState>) -> impl Responder {
    match data.billing.webhook.verification_key() {
        Some(key) => HttpResponse::Ok().json(WebhookVerificationResponse {
            key: key.to_string(),
        }),
        None => ApiResponse::service_unavailable(
            "WEBHOOK_NOT_CONFIGURED",
            "Webhook verification key is not configured",
        ),
    }
}

/// Payment notifications from Viva
///
/// Authenticated with `Authorization: Bearer <verification key>`.
#[utoipa::path(
    post,
    path = "/api/billing/viva/webhook",
    tag = "billing",
    request_body = WebhookEvent,
    responses(
        (status = 200, description = "Event handled or ignored", body = inline(SuccessResponse<WebhookOutcome>)),
        (status = 400, description = "Malformed event", body = ErrorResponse),
        (status = 401, description = "Wrong webhook key", body = ErrorResponse),
    )
)]
#[post("/api/billing/viva/webhook")]
pub async fn viva_webhook_handler(
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let webhook = &data.billing.webhook;

    if !bearer_token(&req).is_some_and(|key| webhook.verify(key)) {
        warn!(peer = ?req.peer_addr(), "Rejected webhook with invalid key");
        return ApiResponse::unauthorized("INVALID_WEBHOOK_KEY", "Invalid webhook key");
    }

    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "Malformed webhook payload");
            return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string());
        }
    };

    match webhook.execute(event).await {
        Ok(outcome) => ApiResponse::success(outcome),
        Err(HandleWebhookError::RepositoryError(e)) => {
            error!(error = %e, "Failed to apply webhook event");
            ApiResponse::internal_error()
        }
    }
}
