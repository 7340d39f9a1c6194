use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::notification::application::domain::entities::NotificationLogEntry;
use crate::notification::application::use_cases::notification_history::NotificationHistoryError;
use crate::shared::api::pagination::{limit_error_response, LimitRange};
use crate::shared::api::ApiResponse;
use crate::AppState;

pub const HISTORY_LIMIT: LimitRange = LimitRange::new(50, 1, 200);

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationHistoryQuery {
    /// 1..=200, default 50.
    pub limit: Option<u64>,
}

/// Notifications sent to the caller
#[utoipa::path(
    get,
    path = "/api/auth/notification-history",
    tag = "notifications",
    security(("BearerAuth" = [])),
    params(NotificationHistoryQuery),
    responses(
        (status = 200, description = "Newest first", body = inline(SuccessResponse<Vec<NotificationLogEntry>>)),
        (status = 400, description = "Invalid limit", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[get("/api/auth/notification-history")]
pub async fn notification_history_handler(
    user: AuthenticatedUser,
    query: web::Query<NotificationHistoryQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let limit = match HISTORY_LIMIT.resolve(query.limit) {
        Ok(limit) => limit,
        Err(e) => return limit_error_response(e),
    };

    match data.notification.history.execute(user.user_id, limit).await {
        Ok(entries) => ApiResponse::success(entries),
        Err(NotificationHistoryError::QueryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to load notification history");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::notification::application::use_cases::notification_history::INotificationHistoryUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::token_provider_for;
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct EmptyHistory;

    #[async_trait]
    impl INotificationHistoryUseCase for EmptyHistory {
        async fn execute(
            &self,
            _user_id: UserId,
            _limit: u64,
        ) -> Result<Vec<NotificationLogEntry>, NotificationHistoryError> {
            Ok(vec![])
        }
    }

    #[actix_web::test]
    async fn test_history_limit_bounds() {
        let app_state = TestAppStateBuilder::default()
            .with_notification_history(EmptyHistory)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_for(UserId::new()))
                .service(notification_history_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/auth/notification-history?limit=200")
            .insert_header(("Authorization", "Bearer test_token"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);

        let req = test::TestRequest::get()
            .uri("/api/auth/notification-history?limit=201")
            .insert_header(("Authorization", "Bearer test_token"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }
}
