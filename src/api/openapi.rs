use crate::api::schemas::{ErrorDetail, ErrorResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::announcement::application::domain::entities::{Attachment, Category, Post};
use crate::auth::adapter::incoming::web::routes::dto::{AuthSessionResponse, UserProfileResponse};
use crate::auth::adapter::incoming::web::routes::login::LoginRequestDto;
use crate::auth::adapter::incoming::web::routes::saved_searches::SavedSearchCreated;
use crate::auth::adapter::incoming::web::routes::signup::SignupRequestDto;
use crate::auth::application::domain::saved_search::{NewSavedSearch, SavedSearch};
use crate::consent::application::domain::consent_state::{ConsentState, ConsentValue};
use crate::notification::application::domain::entities::{PushSubscription, PushSubscriptionKeys};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DrugAlert.gr API",
        version = "1.0.0",
        description = "Announcements of the Greek National Organization for Medicines, with alerts and subscriptions",
        contact(
            name = "DrugAlert.gr Support",
            email = "support@drugalert.gr"
        )
    ),
    paths(
        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::signup::signup_handler,
        crate::auth::adapter::incoming::web::routes::login::login_handler,
        crate::auth::adapter::incoming::web::routes::logout::logout_handler,
        crate::auth::adapter::incoming::web::routes::me::get_me_handler,
        crate::auth::adapter::incoming::web::routes::me::update_me_handler,
        crate::auth::adapter::incoming::web::routes::notification_preferences::update_notification_preferences_handler,
        crate::auth::adapter::incoming::web::routes::saved_searches::list_saved_searches_handler,
        crate::auth::adapter::incoming::web::routes::saved_searches::create_saved_search_handler,

        // Announcement endpoints
        crate::announcement::adapter::incoming::web::routes::categories::list_categories_handler,
        crate::announcement::adapter::incoming::web::routes::categories::get_category_handler,
        crate::announcement::adapter::incoming::web::routes::posts::list_posts_handler,
        crate::announcement::adapter::incoming::web::routes::posts::recent_posts_handler,
        crate::announcement::adapter::incoming::web::routes::posts::get_post_handler,
        crate::announcement::adapter::incoming::web::routes::mark_read::mark_read_handler,
        crate::announcement::adapter::incoming::web::routes::dashboard::dashboard_handler,
        crate::announcement::adapter::incoming::web::routes::stats::stats_handler,
        crate::announcement::adapter::incoming::web::routes::scrape_logs::scrape_logs_handler,

        // Notification endpoints
        crate::notification::adapter::incoming::web::routes::vapid::vapid_public_key_handler,
        crate::notification::adapter::incoming::web::routes::push_subscription::subscribe_push_handler,
        crate::notification::adapter::incoming::web::routes::push_subscription::unsubscribe_push_handler,
        crate::notification::adapter::incoming::web::routes::history::notification_history_handler,

        // Billing endpoints
        crate::billing::adapter::incoming::web::routes::subscription::subscription_handler,
        crate::billing::adapter::incoming::web::routes::subscription::checkout_handler,
        crate::billing::adapter::incoming::web::routes::subscription::cancel_subscription_handler,
        crate::billing::adapter::incoming::web::routes::webhook::viva_webhook_verification_handler,
        crate::billing::adapter::incoming::web::routes::webhook::viva_webhook_handler,

        // Assistant and consent endpoints
        crate::assistant::adapter::incoming::web::routes::ask::ask_assistant_handler,
        crate::consent::adapter::incoming::web::routes::consent::consent_defaults_handler,
        crate::consent::adapter::incoming::web::routes::consent::record_consent_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorDetail,
            SignupRequestDto,
            LoginRequestDto,
            AuthSessionResponse,
            UserProfileResponse,
            SavedSearch,
            NewSavedSearch,
            SavedSearchCreated,
            Category,
            Post,
            Attachment,
            PushSubscription,
            PushSubscriptionKeys,
            ConsentState,
            ConsentValue,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Signup, login and the caller's profile"),
        (name = "announcements", description = "Scraped announcements, categories and statistics"),
        (name = "notifications", description = "Web push subscriptions and notification history"),
        (name = "billing", description = "Annual subscription through Viva Wallet"),
        (name = "assistant", description = "FAQ assistant with article search"),
        (name = "consent", description = "Cookie consent defaults and audit records"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
