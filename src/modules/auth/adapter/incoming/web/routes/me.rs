use actix_web::{get, put, web, Responder};
use tracing::error;

use super::dto::UserProfileResponse;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::use_cases::get_current_user::GetCurrentUserError;
use crate::auth::application::use_cases::update_profile::{UpdateProfileError, UpdateProfileInput};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Current user
///
/// Returns the caller's profile. A trial or subscription whose period has
/// ended is reported (and stored) as `expired`.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Profile", body = inline(SuccessResponse<UserProfileResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
    )
)]
#[get("/api/auth/me")]
pub async fn get_me_handler(user: AuthenticatedUser, data: web::Data<AppState>) -> impl Responder {
    match data.auth.current_user.execute(user.user_id).await {
        Ok(account) => ApiResponse::success(UserProfileResponse::from(account)),
        Err(GetCurrentUserError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(GetCurrentUserError::QueryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to load current user");
            ApiResponse::internal_error()
        }
    }
}

/// Update profile
///
/// Omitted fields are kept; empty strings clear optional fields.
#[utoipa::path(
    put,
    path = "/api/auth/me",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Updated profile", body = inline(SuccessResponse<UserProfileResponse>)),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[put("/api/auth/me")]
pub async fn update_me_handler(
    user: AuthenticatedUser,
    req: web::Json<UpdateProfileInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .auth
        .update_profile
        .execute(user.user_id, req.into_inner())
        .await
    {
        Ok(account) => ApiResponse::success(UserProfileResponse::from(account)),
        Err(UpdateProfileError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(UpdateProfileError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Profile update failed");
            ApiResponse::internal_error()
        }
        Err(e) => ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::{SubscriptionStatus, UserAccount, UserId};
    use crate::auth::application::use_cases::get_current_user::IGetCurrentUserUseCase;
    use crate::auth::application::use_cases::update_profile::IUpdateProfileUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::token_provider_for;
    use crate::tests::support::fixtures::sample_account;
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct FixedCurrentUser(Result<UserAccount, GetCurrentUserError>);

    #[async_trait]
    impl IGetCurrentUserUseCase for FixedCurrentUser {
        async fn execute(&self, _user_id: UserId) -> Result<UserAccount, GetCurrentUserError> {
            self.0.clone()
        }
    }

    struct FixedUpdate(Result<UserAccount, UpdateProfileError>);

    #[async_trait]
    impl IUpdateProfileUseCase for FixedUpdate {
        async fn execute(
            &self,
            _user_id: UserId,
            _input: UpdateProfileInput,
        ) -> Result<UserAccount, UpdateProfileError> {
            self.0.clone()
        }
    }

    #[actix_web::test]
    async fn test_get_me_success() {
        let mut account = sample_account();
        account.subscription_status = SubscriptionStatus::Expired;
        let user_id = account.id;

        let app_state = TestAppStateBuilder::default()
            .with_current_user(FixedCurrentUser(Ok(account)))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_for(user_id))
                .service(get_me_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("Authorization", "Bearer test_token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["id"], user_id.to_string());
        assert_eq!(body["data"]["subscription_status"], "expired");
        assert_eq!(body["data"]["has_premium_access"], false);
    }

    #[actix_web::test]
    async fn test_get_me_user_not_found() {
        let app_state = TestAppStateBuilder::default()
            .with_current_user(FixedCurrentUser(Err(GetCurrentUserError::UserNotFound)))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_for(UserId::new()))
                .service(get_me_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("Authorization", "Bearer test_token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_update_me_success() {
        let mut account = sample_account();
        account.phone_number = Some("+306900000000".into());

        let app_state = TestAppStateBuilder::default()
            .with_update_profile(FixedUpdate(Ok(account)))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_for(UserId::new()))
                .service(update_me_handler),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/api/auth/me")
            .insert_header(("Authorization", "Bearer test_token"))
            .set_json(serde_json::json!({ "phone_number": "+30 690 000 0000" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["phone_number"], "+306900000000");
    }

    #[actix_web::test]
    async fn test_update_me_invalid_phone() {
        let app_state = TestAppStateBuilder::default()
            .with_update_profile(FixedUpdate(Err(UpdateProfileError::InvalidPhoneNumber)))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_for(UserId::new()))
                .service(update_me_handler),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/api/auth/me")
            .insert_header(("Authorization", "Bearer test_token"))
            .set_json(serde_json::json!({ "phone_number": "call me" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
