use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;

use crate::announcement::application::domain::entities::{
    Post, PostFilter, PostListing, PostPage, PostSort, SortOrder,
};
use crate::announcement::application::use_cases::get_post::GetPostError;
use crate::announcement::application::use_cases::list_posts::{ListPostsError, ListPostsRequest};
use crate::announcement::application::use_cases::recent_posts::RecentPostsError;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::OptionalUser;
use crate::auth::application::domain::entities::UserId;
use crate::shared::api::pagination::{limit_error_response, LimitRange};
use crate::shared::api::ApiResponse;
use crate::AppState;

pub const POSTS_LIMIT: LimitRange = LimitRange::new(20, 1, 100);
pub const RECENT_POSTS_LIMIT: LimitRange = LimitRange::new(10, 1, 50);

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPostsQuery {
    pub category_id: Option<i32>,
    /// Case-insensitive match on title or content.
    pub search: Option<String>,
    #[serde(default)]
    pub skip: u64,
    /// 1..=100, default 20.
    pub limit: Option<u64>,
    #[serde(default)]
    #[param(inline)]
    pub sort_by: PostSort,
    #[serde(default)]
    #[param(inline)]
    pub order: SortOrder,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentPostsQuery {
    /// 1..=50, default 10.
    pub limit: Option<u64>,
}

fn viewer(user: &OptionalUser) -> Option<UserId> {
    user.0.as_ref().map(|u| u.user_id)
}

/// List announcements
///
/// Active posts only. A signed-in caller also gets `is_read` on every item.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "announcements",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "Page of posts", body = inline(SuccessResponse<PostPage>)),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
    )
)]
#[get("/api/posts")]
pub async fn list_posts_handler(
    user: OptionalUser,
    query: web::Query<ListPostsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let limit = match POSTS_LIMIT.resolve(query.limit) {
        Ok(limit) => limit,
        Err(e) => return limit_error_response(e),
    };

    let request = ListPostsRequest {
        filter: PostFilter {
            category_id: query.category_id,
            search: query.search,
        },
        listing: PostListing {
            sort: query.sort_by,
            order: query.order,
            skip: query.skip,
            limit,
        },
        viewer: viewer(&user),
    };

    match data.announcement.list_posts.execute(request).await {
        Ok(page) => ApiResponse::success(page),
        Err(ListPostsError::QueryError(e)) => {
            error!(error = %e, "Failed to list posts");
            ApiResponse::internal_error()
        }
    }
}

/// Latest announcements
///
/// Ordered by the time the post was picked up, newest first.
#[utoipa::path(
    get,
    path = "/api/posts/recent",
    tag = "announcements",
    params(RecentPostsQuery),
    responses(
        (status = 200, description = "Recent posts", body = inline(SuccessResponse<Vec<Post>>)),
        (status = 400, description = "Invalid limit", body = ErrorResponse),
    )
)]
#[get("/api/posts/recent")]
pub async fn recent_posts_handler(
    user: OptionalUser,
    query: web::Query<RecentPostsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let limit = match RECENT_POSTS_LIMIT.resolve(query.limit) {
        Ok(limit) => limit,
        Err(e) => return limit_error_response(e),
    };

    match data
        .announcement
        .recent_posts
        .execute(limit, viewer(&user))
        .await
    {
        Ok(posts) => ApiResponse::success(posts),
        Err(RecentPostsError::QueryError(e)) => {
            error!(error = %e, "Failed to load recent posts");
            ApiResponse::internal_error()
        }
    }
}

/// Get announcement
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "announcements",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post with attachments", body = inline(SuccessResponse<Post>)),
        (status = 404, description = "Unknown or inactive post", body = ErrorResponse),
    )
)]
#[get("/api/posts/{id:\\d+}")]
pub async fn get_post_handler(
    user: OptionalUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data.announcement.get_post.execute(id, viewer(&user)).await {
        Ok(post) => ApiResponse::success(post),
        Err(GetPostError::PostNotFound) => ApiResponse::not_found("POST_NOT_FOUND", "Post not found"),
        Err(GetPostError::QueryError(e)) => {
            error!(post_id = id, error = %e, "Failed to load post");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcement::application::use_cases::get_post::IGetPostUseCase;
    use crate::announcement::application::use_cases::list_posts::IListPostsUseCase;
    use crate::announcement::application::use_cases::recent_posts::IRecentPostsUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::token_provider_for;
    use crate::tests::support::fixtures::sample_post;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct RecordingList {
        requests: Arc<Mutex<Vec<ListPostsRequest>>>,
    }

    #[async_trait]
    impl IListPostsUseCase for RecordingList {
        async fn execute(&self, request: ListPostsRequest) -> Result<PostPage, ListPostsError> {
            let mut post = sample_post(1);
            post.is_read = request.viewer.map(|_| false);
            let page = PostPage {
                items: vec![post],
                total: 1,
                skip: request.listing.skip,
                limit: request.listing.limit,
            };
            self.requests.lock().unwrap().push(request);
            Ok(page)
        }
    }

    struct FixedRecent;

    #[async_trait]
    impl IRecentPostsUseCase for FixedRecent {
        async fn execute(
            &self,
            limit: u64,
            _viewer: Option<UserId>,
        ) -> Result<Vec<Post>, RecentPostsError> {
            Ok((1..=limit as i32).map(sample_post).collect())
        }
    }

    struct FixedPost(Result<Post, GetPostError>);

    #[async_trait]
    impl IGetPostUseCase for FixedPost {
        async fn execute(&self, _id: i32, _viewer: Option<UserId>) -> Result<Post, GetPostError> {
            self.0.clone()
        }
    }

    #[actix_web::test]
    async fn test_list_posts_defaults() {
        let list = RecordingList::default();
        let app_state = TestAppStateBuilder::default()
            .with_list_posts(list.clone())
            .build();
        let app = test::init_service(App::new().app_data(app_state).service(list_posts_handler)).await;

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["limit"], 20);
        assert!(body["data"]["items"][0].get("is_read").is_none());

        let request = list.requests.lock().unwrap()[0].clone();
        assert_eq!(request.listing.sort, PostSort::PublishDate);
        assert_eq!(request.listing.order, SortOrder::Desc);
        assert!(request.viewer.is_none());
    }

    #[actix_web::test]
    async fn test_list_posts_passes_filters_and_viewer() {
        let list = RecordingList::default();
        let user_id = UserId::new();
        let app_state = TestAppStateBuilder::default()
            .with_list_posts(list.clone())
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_for(user_id))
                .service(list_posts_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/posts?category_id=3&search=depon&skip=40&limit=10&sort_by=title&order=asc")
            .insert_header(("Authorization", "Bearer test_token"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["items"][0]["is_read"], false);

        let request = list.requests.lock().unwrap()[0].clone();
        assert_eq!(request.filter.category_id, Some(3));
        assert_eq!(request.filter.search.as_deref(), Some("depon"));
        assert_eq!(request.listing.skip, 40);
        assert_eq!(request.listing.limit, 10);
        assert_eq!(request.listing.sort, PostSort::Title);
        assert_eq!(request.listing.order, SortOrder::Asc);
        assert_eq!(request.viewer, Some(user_id));
    }

    #[actix_web::test]
    async fn test_list_posts_rejects_limit_above_range() {
        let app_state = TestAppStateBuilder::default()
            .with_list_posts(RecordingList::default())
            .build();
        let app = test::init_service(App::new().app_data(app_state).service(list_posts_handler)).await;

        let req = test::TestRequest::get().uri("/api/posts?limit=101").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_LIMIT");
    }

    #[actix_web::test]
    async fn test_recent_posts_limit() {
        let app_state = TestAppStateBuilder::default()
            .with_recent_posts(FixedRecent)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(recent_posts_handler)
                .service(get_post_handler),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/posts/recent?limit=3").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 3);

        let req = test::TestRequest::get().uri("/api/posts/recent?limit=51").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_get_post_not_found() {
        let app_state = TestAppStateBuilder::default()
            .with_get_post(FixedPost(Err(GetPostError::PostNotFound)))
            .build();
        let app = test::init_service(App::new().app_data(app_state).service(get_post_handler)).await;

        let req = test::TestRequest::get().uri("/api/posts/12").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "POST_NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_get_post_success() {
        let app_state = TestAppStateBuilder::default()
            .with_get_post(FixedPost(Ok(sample_post(12))))
            .build();
        let app = test::init_service(App::new().app_data(app_state).service(get_post_handler)).await;

        let req = test::TestRequest::get().uri("/api/posts/12").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["id"], 12);
    }
}
