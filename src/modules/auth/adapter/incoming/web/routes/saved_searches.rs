use actix_web::{get, post, web, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::domain::saved_search::{NewSavedSearch, SavedSearch};
use crate::auth::application::use_cases::{
    create_saved_search::CreateSavedSearchError, list_saved_searches::ListSavedSearchesError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct SavedSearchCreated {
    pub id: i32,
}

/// Saved searches of the signed-in user
#[utoipa::path(
    get,
    path = "/api/auth/saved-searches",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Saved searches, oldest first", body = inline(SuccessResponse<Vec<SavedSearch>>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[get("/api/auth/saved-searches")]
pub async fn list_saved_searches_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.auth.list_saved_searches.execute(user.user_id).await {
        Ok(searches) => ApiResponse::success(searches),
        Err(ListSavedSearchesError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Loading saved searches failed");
            ApiResponse::internal_error()
        }
    }
}

/// Save a search
#[utoipa::path(
    post,
    path = "/api/auth/saved-searches",
    tag = "auth",
    security(("BearerAuth" = [])),
    request_body = NewSavedSearch,
    responses(
        (status = 201, description = "Search saved", body = inline(SuccessResponse<SavedSearchCreated>)),
        (status = 400, description = "Blank or overlong name", body = ErrorResponse),
        (status = 404, description = "Unknown category", body = ErrorResponse),
    )
)]
#[post("/api/auth/saved-searches")]
pub async fn create_saved_search_handler(
    user: AuthenticatedUser,
    req: web::Json<NewSavedSearch>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .auth
        .create_saved_search
        .execute(user.user_id, req.into_inner())
        .await
    {
        Ok(id) => ApiResponse::created(SavedSearchCreated { id }),
        Err(e @ CreateSavedSearchError::InvalidName) => {
            ApiResponse::bad_request("INVALID_NAME", &e.to_string())
        }
        Err(CreateSavedSearchError::CategoryNotFound) => {
            ApiResponse::not_found("CATEGORY_NOT_FOUND", "Category not found")
        }
        Err(CreateSavedSearchError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Saving search failed");
            ApiResponse::internal_error()
        }
    }
}
