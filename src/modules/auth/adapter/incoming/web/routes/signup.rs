use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::dto::AuthSessionResponse;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::signup_user::{SignupError, SignupRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct SignupRequestDto {
    #[schema(example = "maria@example.com")]
    pub email: String,
    /// At least 8 characters
    #[schema(example = "SecurePass123!")]
    pub password: String,
    #[schema(example = "Μαρία Παπαδοπούλου")]
    pub full_name: Option<String>,
    #[serde(alias = "phone")]
    #[schema(example = "+306912345678")]
    pub phone_number: Option<String>,
}

/// Create an account
///
/// Starts the free trial and returns a bearer token for the new user.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupRequestDto,
    responses(
        (status = 201, description = "Account created", body = inline(SuccessResponse<AuthSessionResponse>)),
        (
            status = 400,
            description = "Validation failed or email taken",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "EMAIL_ALREADY_REGISTERED", "message": "Email already registered" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/signup")]
pub async fn signup_handler(
    req: web::Json<SignupRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match SignupRequest::new(dto.email, dto.password, dto.full_name, dto.phone_number)
    {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.auth.signup.execute(request).await {
        Ok(session) => {
            info!(user_id = %session.user.id, "Signup completed");
            ApiResponse::created(AuthSessionResponse::from(session))
        }
        Err(SignupError::EmailAlreadyRegistered) => {
            warn!("Signup rejected: email already registered");
            ApiResponse::bad_request("EMAIL_ALREADY_REGISTERED", "Email already registered")
        }
        Err(e) => {
            error!(error = %e, "Signup failed");
            ApiResponse::internal_error()
        }
    }
}
