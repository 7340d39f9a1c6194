use std::sync::Arc;

use actix_web::web;

use crate::auth::application::use_cases::signup_user::ISignupUserUseCase;
use crate::auth::application::use_cases::login_user::ILoginUserUseCase;
use crate::auth::application::use_cases::logout_user::ILogoutUseCase;
use crate::auth::application::use_cases::get_current_user::IGetCurrentUserUseCase;
use crate::auth::application::use_cases::update_profile::IUpdateProfileUseCase;
use crate::auth::application::use_cases::update_notification_preferences::IUpdateNotificationPreferencesUseCase;
use crate::auth::application::use_cases::list_saved_searches::IListSavedSearchesUseCase;
use crate::auth::application::use_cases::create_saved_search::ICreateSavedSearchUseCase;
use crate::announcement::application::use_cases::list_categories::IListCategoriesUseCase;
use crate::announcement::application::use_cases::get_category::IGetCategoryUseCase;
use crate::announcement::application::use_cases::list_posts::IListPostsUseCase;
use crate::announcement::application::use_cases::recent_posts::IRecentPostsUseCase;
use crate::announcement::application::use_cases::get_post::IGetPostUseCase;
use crate::announcement::application::use_cases::mark_post_read::IMarkPostReadUseCase;
use crate::announcement::application::use_cases::get_dashboard::IGetDashboardUseCase;
use crate::announcement::application::use_cases::get_stats::IGetStatsUseCase;
use crate::announcement::application::use_cases::list_scrape_logs::IListScrapeLogsUseCase;
use crate::notification::application::use_cases::subscribe_push::ISubscribePushUseCase;
use crate::notification::application::use_cases::unsubscribe_push::IUnsubscribePushUseCase;
use crate::notification::application::use_cases::notification_history::INotificationHistoryUseCase;
use crate::billing::application::use_cases::get_subscription::IGetSubscriptionUseCase;
use crate::billing::application::use_cases::create_checkout::ICreateCheckoutUseCase;
use crate::billing::application::use_cases::cancel_subscription::ICancelSubscriptionUseCase;
use crate::billing::application::use_cases::handle_webhook::IHandleWebhookUseCase;
use crate::billing::application::use_cases::expire_subscriptions::IExpireSubscriptionsUseCase;
use crate::billing::application::use_cases::renew_subscriptions::IRenewSubscriptionsUseCase;
use crate::assistant::application::use_cases::ask_assistant::IAskAssistantUseCase;
use crate::consent::application::use_cases::record_consent::IRecordConsentUseCase;
use crate::auth::application::AuthUseCases;
use crate::announcement::application::AnnouncementUseCases;
use crate::notification::application::NotificationUseCases;
use crate::billing::application::BillingUseCases;
use crate::assistant::application::AssistantUseCases;
use crate::consent::application::ConsentUseCases;
use crate::consent::application::use_cases::consent_defaults::ConsentDefaultsUseCase;
use crate::notification::application::domain::vapid::VapidConfig;
use crate::tests::support::stubs::*;
use crate::AppState;

/// Builds an [`AppState`] whose use cases are harmless stubs, letting a
/// route test swap in only the ones it exercises.
pub struct TestAppStateBuilder {
    auth: AuthUseCases,
    announcement: AnnouncementUseCases,
    notification: NotificationUseCases,
    billing: BillingUseCases,
    assistant: AssistantUseCases,
    consent: ConsentUseCases,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            auth: AuthUseCases {
                signup: Arc::new(StubSignup),
                login: Arc::new(StubLogin),
                logout: Arc::new(StubLogout),
                current_user: Arc::new(FixedCurrentUser::missing()),
                update_profile: Arc::new(StubUpdateProfile),
                update_preferences: Arc::new(StubUpdatePreferences),
                list_saved_searches: Arc::new(StubListSavedSearches),
                create_saved_search: Arc::new(StubCreateSavedSearch),
            },
            announcement: AnnouncementUseCases {
                list_categories: Arc::new(StubListCategories),
                get_category: Arc::new(StubGetCategory),
                list_posts: Arc::new(StubListPosts),
                recent_posts: Arc::new(StubRecentPosts),
                get_post: Arc::new(StubGetPost),
                mark_read: Arc::new(StubMarkRead),
                dashboard: Arc::new(StubDashboard),
                stats: Arc::new(StubStats),
                scrape_logs: Arc::new(StubScrapeLogs),
            },
            notification: NotificationUseCases {
                subscribe: Arc::new(StubSubscribePush),
                unsubscribe: Arc::new(StubUnsubscribePush),
                history: Arc::new(StubNotificationHistory),
                vapid: VapidConfig::default(),
            },
            billing: BillingUseCases {
                subscription: Arc::new(StubGetSubscription),
                checkout: Arc::new(StubCheckout),
                cancel: Arc::new(StubCancelSubscription),
                webhook: Arc::new(StubWebhook),
                expire: Arc::new(StubExpireSubscriptions),
                renew: Arc::new(StubRenewSubscriptions),
            },
            assistant: AssistantUseCases {
                ask: Arc::new(StubAssistant),
            },
            consent: ConsentUseCases {
                record: Arc::new(StubRecordConsent),
                defaults: Arc::new(ConsentDefaultsUseCase),
            },
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_signup(mut self, use_case: impl ISignupUserUseCase + Send + Sync + 'static) -> Self {
        self.auth.signup = Arc::new(use_case);
        self
    }

    pub fn with_login(mut self, use_case: impl ILoginUserUseCase + Send + Sync + 'static) -> Self {
        self.auth.login = Arc::new(use_case);
        self
    }

    pub fn with_logout(mut self, use_case: impl ILogoutUseCase + Send + Sync + 'static) -> Self {
        self.auth.logout = Arc::new(use_case);
        self
    }

    pub fn with_current_user(mut self, use_case: impl IGetCurrentUserUseCase + Send + Sync + 'static) -> Self {
        self.auth.current_user = Arc::new(use_case);
        self
    }

    pub fn with_update_profile(mut self, use_case: impl IUpdateProfileUseCase + Send + Sync + 'static) -> Self {
        self.auth.update_profile = Arc::new(use_case);
        self
    }

    pub fn with_update_preferences(mut self, use_case: impl IUpdateNotificationPreferencesUseCase + Send + Sync + 'static) -> Self {
        self.auth.update_preferences = Arc::new(use_case);
        self
    }

    pub fn with_list_saved_searches(mut self, use_case: impl IListSavedSearchesUseCase + Send + Sync + 'static) -> Self {
        self.auth.list_saved_searches = Arc::new(use_case);
        self
    }

    pub fn with_create_saved_search(mut self, use_case: impl ICreateSavedSearchUseCase + Send + Sync + 'static) -> Self {
        self.auth.create_saved_search = Arc::new(use_case);
        self
    }

    pub fn with_list_categories(mut self, use_case: impl IListCategoriesUseCase + Send + Sync + 'static) -> Self {
        self.announcement.list_categories = Arc::new(use_case);
        self
    }

    pub fn with_get_category(mut self, use_case: impl IGetCategoryUseCase + Send + Sync + 'static) -> Self {
        self.announcement.get_category = Arc::new(use_case);
        self
    }

    pub fn with_list_posts(mut self, use_case: impl IListPostsUseCase + Send + Sync + 'static) -> Self {
        self.announcement.list_posts = Arc::new(use_case);
        self
    }

    pub fn with_recent_posts(mut self, use_case: impl IRecentPostsUseCase + Send + Sync + 'static) -> Self {
        self.announcement.recent_posts = Arc::new(use_case);
        self
    }

    pub fn with_get_post(mut self, use_case: impl IGetPostUseCase + Send + Sync + 'static) -> Self {
        self.announcement.get_post = Arc::new(use_case);
        self
    }

    pub fn with_mark_read(mut self, use_case: impl IMarkPostReadUseCase + Send + Sync + 'static) -> Self {
        self.announcement.mark_read = Arc::new(use_case);
        self
    }

    pub fn with_dashboard(mut self, use_case: impl IGetDashboardUseCase + Send + Sync + 'static) -> Self {
        self.announcement.dashboard = Arc::new(use_case);
        self
    }

    pub fn with_stats(mut self, use_case: impl IGetStatsUseCase + Send + Sync + 'static) -> Self {
        self.announcement.stats = Arc::new(use_case);
        self
    }

    pub fn with_scrape_logs(mut self, use_case: impl IListScrapeLogsUseCase + Send + Sync + 'static) -> Self {
        self.announcement.scrape_logs = Arc::new(use_case);
        self
    }

    pub fn with_subscribe_push(mut self, use_case: impl ISubscribePushUseCase + Send + Sync + 'static) -> Self {
        self.notification.subscribe = Arc::new(use_case);
        self
    }

    pub fn with_unsubscribe_push(mut self, use_case: impl IUnsubscribePushUseCase + Send + Sync + 'static) -> Self {
        self.notification.unsubscribe = Arc::new(use_case);
        self
    }

    pub fn with_notification_history(mut self, use_case: impl INotificationHistoryUseCase + Send + Sync + 'static) -> Self {
        self.notification.history = Arc::new(use_case);
        self
    }

    pub fn with_vapid(mut self, vapid: VapidConfig) -> Self {
        self.notification.vapid = vapid;
        self
    }

    pub fn with_subscription(mut self, use_case: impl IGetSubscriptionUseCase + Send + Sync + 'static) -> Self {
        self.billing.subscription = Arc::new(use_case);
        self
    }

    pub fn with_checkout(mut self, use_case: impl ICreateCheckoutUseCase + Send + Sync + 'static) -> Self {
        self.billing.checkout = Arc::new(use_case);
        self
    }

    pub fn with_cancel_subscription(mut self, use_case: impl ICancelSubscriptionUseCase + Send + Sync + 'static) -> Self {
        self.billing.cancel = Arc::new(use_case);
        self
    }

    pub fn with_webhook(mut self, use_case: impl IHandleWebhookUseCase + Send + Sync + 'static) -> Self {
        self.billing.webhook = Arc::new(use_case);
        self
    }

    pub fn with_expire_subscriptions(mut self, use_case: impl IExpireSubscriptionsUseCase + Send + Sync + 'static) -> Self {
        self.billing.expire = Arc::new(use_case);
        self
    }

    pub fn with_renew_subscriptions(mut self, use_case: impl IRenewSubscriptionsUseCase + Send + Sync + 'static) -> Self {
        self.billing.renew = Arc::new(use_case);
        self
    }

    pub fn with_assistant(mut self, use_case: impl IAskAssistantUseCase + Send + Sync + 'static) -> Self {
        self.assistant.ask = Arc::new(use_case);
        self
    }

    pub fn with_record_consent(mut self, use_case: impl IRecordConsentUseCase + Send + Sync + 'static) -> Self {
        self.consent.record = Arc::new(use_case);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            auth: self.auth,
            announcement: self.announcement,
            notification: self.notification,
            billing: self.billing,
            assistant: self.assistant,
            consent: self.consent,
        })
    }
}
