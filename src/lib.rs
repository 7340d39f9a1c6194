pub mod api;
pub mod client;
pub mod health;
pub mod modules;
pub mod scheduler;
pub mod shared;

pub use modules::announcement;
pub use modules::assistant;
pub use modules::auth;
pub use modules::billing;
pub use modules::consent;
pub use modules::notification;
pub use modules::scraper;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::announcement::application::AnnouncementUseCases;
use crate::assistant::application::AssistantUseCases;
use crate::auth::application::AuthUseCases;
use crate::billing::application::BillingUseCases;
use crate::consent::application::ConsentUseCases;
use crate::notification::application::NotificationUseCases;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthUseCases,
    pub announcement: AnnouncementUseCases,
    pub notification: NotificationUseCases,
    pub billing: BillingUseCases,
    pub assistant: AssistantUseCases,
    pub consent: ConsentUseCases,
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);

    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::signup_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::login_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::logout_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::get_me_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::update_me_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::update_notification_preferences_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::list_saved_searches_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::create_saved_search_handler);

    // Announcements
    cfg.service(crate::announcement::adapter::incoming::web::routes::list_categories_handler);
    cfg.service(crate::announcement::adapter::incoming::web::routes::get_category_handler);
    cfg.service(crate::announcement::adapter::incoming::web::routes::recent_posts_handler);
    cfg.service(crate::announcement::adapter::incoming::web::routes::list_posts_handler);
    cfg.service(crate::announcement::adapter::incoming::web::routes::get_post_handler);
    cfg.service(crate::announcement::adapter::incoming::web::routes::mark_read_handler);
    cfg.service(crate::announcement::adapter::incoming::web::routes::dashboard_handler);
    cfg.service(crate::announcement::adapter::incoming::web::routes::stats_handler);
    cfg.service(crate::announcement::adapter::incoming::web::routes::scrape_logs_handler);

    // Notifications
    cfg.service(crate::notification::adapter::incoming::web::routes::vapid_public_key_handler);
    cfg.service(crate::notification::adapter::incoming::web::routes::subscribe_push_handler);
    cfg.service(crate::notification::adapter::incoming::web::routes::unsubscribe_push_handler);
    cfg.service(crate::notification::adapter::incoming::web::routes::notification_history_handler);

    // Billing
    cfg.service(crate::billing::adapter::incoming::web::routes::subscription_handler);
    cfg.service(crate::billing::adapter::incoming::web::routes::checkout_handler);
    cfg.service(crate::billing::adapter::incoming::web::routes::cancel_subscription_handler);
    cfg.service(crate::billing::adapter::incoming::web::routes::viva_webhook_verification_handler);
    cfg.service(crate::billing::adapter::incoming::web::routes::viva_webhook_handler);

    // Assistant
    cfg.service(crate::assistant::adapter::incoming::web::routes::ask_assistant_handler);

    // Consent
    cfg.service(crate::consent::adapter::incoming::web::routes::consent_defaults_handler);
    cfg.service(crate::consent::adapter::incoming::web::routes::record_consent_handler);
}
