use actix_web::{post, web, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::assistant::application::use_cases::ask_assistant::{AskAssistantError, AssistantReply};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AskRequest {
    #[schema(example = "Υπάρχει ανάκληση για το Depon;")]
    pub message: String,
}

/// Ask the help assistant
///
/// General questions get a canned answer; questions about a product or a
/// recall are answered with matching announcements.
#[utoipa::path(
    post,
    path = "/api/assistant/ask",
    tag = "assistant",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Assistant reply", body = inline(SuccessResponse<AssistantReply>)),
        (status = 400, description = "Empty message", body = ErrorResponse),
    )
)]
#[post("/api/assistant/ask")]
pub async fn ask_assistant_handler(
    body: web::Json<AskRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.assistant.ask.execute(&body.message).await {
        Ok(reply) => ApiResponse::success(reply),
        Err(e @ AskAssistantError::EmptyMessage) => {
            ApiResponse::bad_request("EMPTY_MESSAGE", &e.to_string())
        }
    }
}
