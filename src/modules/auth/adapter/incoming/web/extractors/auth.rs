use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use std::sync::Arc;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::{TokenBlacklist, TokenProvider};
use crate::auth::application::services::hash_token;
use crate::shared::api::ApiResponse;

/// Caller identified by a valid, unrevoked bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    /// Raw token, kept so logout can revoke it.
    pub token: String,
}

/// Like [`AuthenticatedUser`] but never rejects; used by public endpoints
/// that personalise their output for signed-in callers.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

enum AuthFailure {
    MissingHeader,
    InvalidToken,
    Revoked,
    Misconfigured,
}

impl AuthFailure {
    fn into_response(self) -> HttpResponse {
        match self {
            AuthFailure::MissingHeader => ApiResponse::unauthorized(
                "MISSING_AUTH_HEADER",
                "Missing or invalid authorization header",
            ),
            AuthFailure::InvalidToken => {
                ApiResponse::unauthorized("INVALID_TOKEN", "Invalid or expired token")
            }
            AuthFailure::Revoked => {
                ApiResponse::unauthorized("TOKEN_REVOKED", "Token has been revoked")
            }
            AuthFailure::Misconfigured => ApiResponse::internal_error(),
        }
    }
}

async fn authenticate(
    token: Option<String>,
    provider: Option<Arc<dyn TokenProvider + Send + Sync>>,
    blacklist: Option<Arc<dyn TokenBlacklist + Send + Sync>>,
) -> Result<AuthenticatedUser, AuthFailure> {
    let provider = provider.ok_or(AuthFailure::Misconfigured)?;
    let token = token.ok_or(AuthFailure::MissingHeader)?;

    let claims = provider
        .verify_token(&token)
        .map_err(|_| AuthFailure::InvalidToken)?;

    if let Some(blacklist) = blacklist {
        match blacklist.is_revoked(&hash_token(&token)).await {
            Ok(true) => return Err(AuthFailure::Revoked),
            Ok(false) => {}
            // Redis being down must not lock every user out.
            Err(e) => tracing::error!(error = %e, "Token blacklist lookup failed"),
        }
    }

    Ok(AuthenticatedUser {
        user_id: claims.sub.into(),
        token,
    })
}

fn collect(
    req: &HttpRequest,
) -> (
    Option<String>,
    Option<Arc<dyn TokenProvider + Send + Sync>>,
    Option<Arc<dyn TokenBlacklist + Send + Sync>>,
) {
    let provider = req
        .app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
        .map(|d| d.get_ref().clone());
    let blacklist = req
        .app_data::<web::Data<Arc<dyn TokenBlacklist + Send + Sync>>>()
        .map(|d| d.get_ref().clone());

    (extract_token_from_header(req), provider, blacklist)
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let (token, provider, blacklist) = collect(req);

        Box::pin(async move {
            authenticate(token, provider, blacklist)
                .await
                .map_err(|failure| create_api_error(failure.into_response()))
        })
    }
}

impl FromRequest for OptionalUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let (token, provider, blacklist) = collect(req);

        Box::pin(async move {
            if token.is_none() {
                return Ok(OptionalUser(None));
            }
            Ok(OptionalUser(authenticate(token, provider, blacklist).await.ok()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::ports::outgoing::TokenBlacklistError;
    use crate::tests::support::auth_helper::token_provider_for;
    use actix_web::{get, test, App, HttpResponse, Responder};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    #[get("/whoami")]
    async fn whoami(user: AuthenticatedUser) -> impl Responder {
        HttpResponse::Ok().body(user.user_id.to_string())
    }

    #[get("/maybe")]
    async fn maybe(user: OptionalUser) -> impl Responder {
        match user.0 {
            Some(u) => HttpResponse::Ok().body(u.user_id.to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    struct FixedBlacklist(Result<bool, TokenBlacklistError>);

    #[async_trait]
    impl TokenBlacklist for FixedBlacklist {
        async fn revoke(
            &self,
            _token_hash: &str,
            _user_id: UserId,
            _expires_at: DateTime<Utc>,
        ) -> Result<(), TokenBlacklistError> {
            unimplemented!("Not used in extractor tests")
        }

        async fn is_revoked(&self, _token_hash: &str) -> Result<bool, TokenBlacklistError> {
            self.0.clone()
        }
    }

    fn blacklist(result: Result<bool, TokenBlacklistError>) -> web::Data<Arc<dyn TokenBlacklist + Send + Sync>> {
        web::Data::new(Arc::new(FixedBlacklist(result)) as Arc<dyn TokenBlacklist + Send + Sync>)
    }

    #[actix_web::test]
    async fn test_valid_token_resolves_user() {
        let user_id = UserId::new();
        let app = test::init_service(
            App::new()
                .app_data(token_provider_for(user_id))
                .service(whoami),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer test_token"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, user_id.to_string().as_bytes());
    }

    #[actix_web::test]
    async fn test_missing_header_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(token_provider_for(UserId::new()))
                .service(whoami),
        )
        .await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "MISSING_AUTH_HEADER");
    }

    #[actix_web::test]
    async fn test_invalid_token_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(token_provider_for(UserId::new()))
                .service(whoami),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer invalid"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }

    #[actix_web::test]
    async fn test_revoked_token_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(token_provider_for(UserId::new()))
                .app_data(blacklist(Ok(true)))
                .service(whoami),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer test_token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "TOKEN_REVOKED");
    }

    #[actix_web::test]
    async fn test_blacklist_outage_lets_request_through() {
        let app = test::init_service(
            App::new()
                .app_data(token_provider_for(UserId::new()))
                .app_data(blacklist(Err(TokenBlacklistError::StoreError(
                    "connection refused".into(),
                ))))
                .service(whoami),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer test_token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn test_missing_provider_is_internal_error() {
        let app = test::init_service(App::new().service(whoami)).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer test_token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);
    }

    #[actix_web::test]
    async fn test_optional_user_without_header_is_anonymous() {
        let app = test::init_service(
            App::new()
                .app_data(token_provider_for(UserId::new()))
                .service(maybe),
        )
        .await;

        let req = test::TestRequest::get().uri("/maybe").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous".as_bytes());
    }

    #[actix_web::test]
    async fn test_optional_user_with_bad_token_is_anonymous() {
        let app = test::init_service(
            App::new()
                .app_data(token_provider_for(UserId::new()))
                .service(maybe),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/maybe")
            .insert_header(("Authorization", "Bearer invalid"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous".as_bytes());
    }
}
