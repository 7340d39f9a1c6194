use actix_web::{get, post, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::billing::application::domain::entities::{CheckoutOrder, SubscriptionOverview};
use crate::billing::application::use_cases::{
    cancel_subscription::CancelSubscriptionError, create_checkout::CreateCheckoutError,
    get_subscription::GetSubscriptionError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Subscription status of the caller
#[utoipa::path(
    get,
    path = "/api/user/subscription",
    tag = "billing",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Current plan", body = inline(SuccessResponse<SubscriptionOverview>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
    )
)]
#[get("/api/user/subscription")]
pub async fn subscription_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.billing.subscription.execute(user.user_id).await {
        Ok(overview) => ApiResponse::success(overview),
        Err(GetSubscriptionError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(GetSubscriptionError::QueryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to load subscription");
            ApiResponse::internal_error()
        }
    }
}

/// Start checkout for the annual plan
///
/// Returns the hosted payment page to redirect to. Activation happens when
/// the provider's webhook confirms the payment.
#[utoipa::path(
    post,
    path = "/api/auth/subscription/checkout",
    tag = "billing",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Order created", body = inline(SuccessResponse<CheckoutOrder>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "Already subscribed", body = ErrorResponse),
        (status = 502, description = "Payment provider failed", body = ErrorResponse),
    )
)]
#[post("/api/auth/subscription/checkout")]
pub async fn checkout_handler(user: AuthenticatedUser, data: web::Data<AppState>) -> impl Responder {
    match data.billing.checkout.execute(user.user_id).await {
        Ok(order) => ApiResponse::success(order),
        Err(e @ CreateCheckoutError::AlreadySubscribed) => {
            ApiResponse::conflict("ALREADY_SUBSCRIBED", &e.to_string())
        }
        Err(CreateCheckoutError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(CreateCheckoutError::GatewayError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Checkout failed at payment provider");
            ApiResponse::bad_gateway(
                "PAYMENT_PROVIDER_ERROR",
                "The payment provider is unavailable, please try again later",
            )
        }
        Err(CreateCheckoutError::QueryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Checkout failed");
            ApiResponse::internal_error()
        }
    }
}

/// Cancel the annual plan
///
/// Stops renewal; premium access remains until the paid period ends.
#[utoipa::path(
    post,
    path = "/api/auth/subscription/cancel",
    tag = "billing",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Cancelled", body = inline(SuccessResponse<SubscriptionOverview>)),
        (status = 400, description = "No active subscription", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[post("/api/auth/subscription/cancel")]
pub async fn cancel_subscription_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.billing.cancel.execute(user.user_id).await {
        Ok(overview) => ApiResponse::success(overview),
        Err(e @ CancelSubscriptionError::NoActiveSubscription) => {
            ApiResponse::bad_request("NO_ACTIVE_SUBSCRIPTION", &e.to_string())
        }
        Err(CancelSubscriptionError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(CancelSubscriptionError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to cancel subscription");
            ApiResponse::internal_error()
        }
    }
}
