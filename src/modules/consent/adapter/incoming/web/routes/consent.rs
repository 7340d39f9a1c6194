use actix_web::{get, post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::OptionalUser;
use crate::consent::application::domain::consent_state::ConsentState;
use crate::consent::application::use_cases::{
    consent_defaults::ConsentDefaults,
    record_consent::{ConsentReceipt, RecordConsentError, RecordConsentRequest},
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConsentDefaultsQuery {
    /// IANA timezone reported by the browser, e.g. `Europe/Athens`.
    pub timezone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordConsentBody {
    /// Random id the browser keeps alongside its stored consent.
    pub visitor_id: String,
    pub state: ConsentState,
}

/// Default consent for a new visitor
#[utoipa::path(
    get,
    path = "/api/consent/defaults",
    tag = "consent",
    params(ConsentDefaultsQuery),
    responses(
        (status = 200, description = "Initial state and whether to show the banner", body = inline(SuccessResponse<ConsentDefaults>)),
    )
)]
#[get("/api/consent/defaults")]
pub async fn consent_defaults_handler(
    query: web::Query<ConsentDefaultsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    ApiResponse::success(data.consent.defaults.execute(query.timezone.as_deref()))
}

/// Record a consent decision
///
/// Stored for audit; the account is attached when the caller is signed in.
#[utoipa::path(
    post,
    path = "/api/consent",
    tag = "consent",
    request_body = RecordConsentBody,
    responses(
        (status = 201, description = "Recorded", body = inline(SuccessResponse<ConsentReceipt>)),
        (status = 400, description = "Invalid visitor id or state", body = ErrorResponse),
    )
)]
#[post("/api/consent")]
pub async fn record_consent_handler(
    user: OptionalUser,
    body: web::Json<RecordConsentBody>,
    data: web::Data<AppState>,
) -> impl Responder {
    let body = body.into_inner();
    let request = RecordConsentRequest {
        visitor_id: body.visitor_id,
        user_id: user.0.map(|u| u.user_id),
        state: body.state,
    };

    match data.consent.record.execute(request).await {
        Ok(receipt) => ApiResponse::created(receipt),
        Err(e @ RecordConsentError::InvalidVisitorId) => {
            ApiResponse::bad_request("INVALID_VISITOR_ID", &e.to_string())
        }
        Err(RecordConsentError::RepositoryError(e)) => {
            error!(error = %e, "Failed to record consent");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::consent::application::use_cases::record_consent::IRecordConsentUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::token_provider_for;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    #[derive(Default)]
    struct CapturingRecorder {
        seen: Mutex<Vec<RecordConsentRequest>>,
    }

    #[async_trait]
    impl IRecordConsentUseCase for Arc<CapturingRecorder> {
        async fn execute(
            &self,
            request: RecordConsentRequest,
        ) -> Result<ConsentReceipt, RecordConsentError> {
            if request.visitor_id.is_empty() {
                return Err(RecordConsentError::InvalidVisitorId);
            }
            self.seen.lock().unwrap().push(request);
            Ok(ConsentReceipt {
                id: Uuid::new_v4(),
                recorded_at: Utc::now(),
            })
        }
    }

    #[actix_web::test]
    async fn test_defaults_for_eu_timezone() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(app_state).service(consent_defaults_handler)).await;

        let req = test::TestRequest::get()
            .uri("/api/consent/defaults?timezone=Europe/Athens")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["is_eu"], true);
        assert_eq!(body["data"]["show_banner"], true);
        assert_eq!(body["data"]["state"]["analytics_storage"], "denied");
        assert_eq!(body["data"]["state"]["security_storage"], "granted");
    }

    #[actix_web::test]
    async fn test_defaults_outside_eu() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(app_state).service(consent_defaults_handler)).await;

        let req = test::TestRequest::get()
            .uri("/api/consent/defaults?timezone=Asia/Tokyo")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["show_banner"], false);
    }

    #[actix_web::test]
    async fn test_signed_in_consent_carries_user() {
        let user_id = UserId::new();
        let recorder = Arc::new(CapturingRecorder::default());
        let app_state = TestAppStateBuilder::default()
            .with_record_consent(Arc::clone(&recorder))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_for(user_id))
                .service(record_consent_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/consent")
            .insert_header(("Authorization", "Bearer test_token"))
            .set_json(serde_json::json!({
                "visitor_id": "v-1",
                "state": ConsentState::accept_all(),
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].user_id, Some(user_id));
        assert_eq!(seen[0].state, ConsentState::accept_all());
    }

    #[actix_web::test]
    async fn test_anonymous_consent_and_bad_visitor() {
        let recorder = Arc::new(CapturingRecorder::default());
        let app_state = TestAppStateBuilder::default()
            .with_record_consent(Arc::clone(&recorder))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_for(UserId::new()))
                .service(record_consent_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/consent")
            .set_json(serde_json::json!({
                "visitor_id": "v-2",
                "state": ConsentState::reject_all(),
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);
        assert_eq!(recorder.seen.lock().unwrap()[0].user_id, None);

        let req = test::TestRequest::post()
            .uri("/api/consent")
            .set_json(serde_json::json!({
                "visitor_id": "",
                "state": ConsentState::reject_all(),
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_VISITOR_ID");
    }
}
