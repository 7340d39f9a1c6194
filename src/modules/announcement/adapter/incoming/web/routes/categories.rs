use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;

use crate::announcement::application::domain::entities::Category;
use crate::announcement::application::use_cases::get_category::GetCategoryError;
use crate::announcement::application::use_cases::list_categories::{
    ListCategoriesError, ListCategoriesRequest,
};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCategoriesQuery {
    /// Only children of this category.
    pub parent_id: Option<i32>,
    /// Add `post_count` (active posts) to every category.
    #[serde(default)]
    pub include_counts: bool,
}

/// List categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "announcements",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "Categories", body = inline(SuccessResponse<Vec<Category>>)),
        (status = 500, description = "Internal error", body = ErrorResponse),
    )
)]
#[get("/api/categories")]
pub async fn list_categories_handler(
    query: web::Query<ListCategoriesQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let request = ListCategoriesRequest {
        parent_id: query.parent_id,
        include_counts: query.include_counts,
    };

    match data.announcement.list_categories.execute(request).await {
        Ok(categories) => ApiResponse::success(categories),
        Err(ListCategoriesError::QueryError(e)) => {
            error!(error = %e, "Failed to list categories");
            ApiResponse::internal_error()
        }
    }
}

/// Get category
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "announcements",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category with post count", body = inline(SuccessResponse<Category>)),
        (status = 404, description = "Unknown category", body = ErrorResponse),
    )
)]
#[get("/api/categories/{id}")]
pub async fn get_category_handler(
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data.announcement.get_category.execute(id).await {
        Ok(category) => ApiResponse::success(category),
        Err(GetCategoryError::CategoryNotFound) => {
            ApiResponse::not_found("CATEGORY_NOT_FOUND", "Category not found")
        }
        Err(GetCategoryError::QueryError(e)) => {
            error!(category_id = id, error = %e, "Failed to load category");
            ApiResponse::internal_error()
        }
    }
}
