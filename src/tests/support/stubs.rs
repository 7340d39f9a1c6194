use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;

use crate::announcement::application::domain::entities::{
    Category, Post, PostPage, ScrapeLogEntry, ScrapeStatus, SiteStats,
};
use crate::announcement::application::use_cases::{
    get_category::{GetCategoryError, IGetCategoryUseCase},
    get_dashboard::{Dashboard, GetDashboardError, IGetDashboardUseCase},
    get_post::{GetPostError, IGetPostUseCase},
    get_stats::{GetStatsError, IGetStatsUseCase},
    list_categories::{IListCategoriesUseCase, ListCategoriesError, ListCategoriesRequest},
    list_posts::{IListPostsUseCase, ListPostsError, ListPostsRequest},
    list_scrape_logs::{IListScrapeLogsUseCase, ListScrapeLogsError},
    mark_post_read::{IMarkPostReadUseCase, MarkPostReadError},
    recent_posts::{IRecentPostsUseCase, RecentPostsError},
};
use crate::assistant::application::use_cases::ask_assistant::{
    AskAssistantError, AssistantReply, IAskAssistantUseCase,
};
use crate::auth::application::domain::entities::{NotificationPreferences, UserAccount, UserId};
use crate::auth::application::domain::saved_search::{NewSavedSearch, SavedSearch};
use crate::auth::application::use_cases::{
    create_saved_search::{CreateSavedSearchError, ICreateSavedSearchUseCase},
    list_saved_searches::{IListSavedSearchesUseCase, ListSavedSearchesError},
    get_current_user::{GetCurrentUserError, IGetCurrentUserUseCase},
    login_user::{AuthSession, ILoginUserUseCase, LoginError, LoginRequest},
    logout_user::{ILogoutUseCase, LogoutError, LogoutRequest},
    signup_user::{ISignupUserUseCase, SignupError, SignupRequest},
    update_notification_preferences::{
        IUpdateNotificationPreferencesUseCase, UpdatePreferencesError,
    },
    update_profile::{IUpdateProfileUseCase, UpdateProfileError, UpdateProfileInput},
};
use crate::billing::application::domain::entities::{
    Activation, CheckoutOrder, ExpirySweep, NewPayment, OrderRequest, RecurringCharge, Renewal,
    RenewalCandidate, RenewalRun, SubscriptionOverview, SubscriptionRecord,
};
use crate::billing::application::domain::webhook::WebhookEvent;
use crate::billing::application::ports::outgoing::{
    PaymentGateway, PaymentGatewayError, SubscriptionRepository, SubscriptionRepositoryError,
};
use crate::billing::application::use_cases::{
    cancel_subscription::{CancelSubscriptionError, ICancelSubscriptionUseCase},
    create_checkout::{CreateCheckoutError, ICreateCheckoutUseCase},
    expire_subscriptions::{ExpireSubscriptionsError, IExpireSubscriptionsUseCase},
    get_subscription::{GetSubscriptionError, IGetSubscriptionUseCase},
    handle_webhook::{HandleWebhookError, IHandleWebhookUseCase, WebhookOutcome},
    renew_subscriptions::{IRenewSubscriptionsUseCase, RenewSubscriptionsError},
};
use crate::consent::application::use_cases::record_consent::{
    ConsentReceipt, IRecordConsentUseCase, RecordConsentError, RecordConsentRequest,
};
use crate::notification::application::domain::entities::{
    NotificationLogEntry, PushSubscription,
};
use crate::notification::application::use_cases::{
    notification_history::{INotificationHistoryUseCase, NotificationHistoryError},
    subscribe_push::{ISubscribePushUseCase, SubscribePushError},
    unsubscribe_push::{IUnsubscribePushUseCase, UnsubscribePushError},
};

const NOT_WIRED: &str = "not wired in this test";

/// Current-user lookup that always answers with the same account.
pub struct FixedCurrentUser(Option<UserAccount>);

impl FixedCurrentUser {
    pub fn found(account: UserAccount) -> Self {
        Self(Some(account))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

#[async_trait]
impl IGetCurrentUserUseCase for FixedCurrentUser {
    async fn execute(&self, _user_id: UserId) -> Result<UserAccount, GetCurrentUserError> {
        self.0.clone().ok_or(GetCurrentUserError::UserNotFound)
    }
}

mock! {
    pub Gateway {}

    #[async_trait]
    impl PaymentGateway for Gateway {
        async fn create_order(&self, order: OrderRequest) -> Result<CheckoutOrder, PaymentGatewayError>;
        async fn cancel_recurring(&self, transaction_id: &str) -> Result<(), PaymentGatewayError>;
        async fn charge_recurring(&self, charge: RecurringCharge) -> Result<String, PaymentGatewayError>;
    }
}

mock! {
    pub Subscriptions {}

    #[async_trait]
    impl SubscriptionRepository for Subscriptions {
        async fn find(&self, user_id: UserId)
            -> Result<Option<SubscriptionRecord>, SubscriptionRepositoryError>;
        async fn record_payment(&self, payment: NewPayment) -> Result<(), SubscriptionRepositoryError>;
        async fn activate(&self, activation: Activation) -> Result<(), SubscriptionRepositoryError>;
        async fn reverse(
            &self,
            user_id: UserId,
            payment: NewPayment,
        ) -> Result<(), SubscriptionRepositoryError>;
        async fn mark_cancelled(&self, user_id: UserId) -> Result<(), SubscriptionRepositoryError>;
        async fn expire_lapsed(&self, now: DateTime<Utc>)
            -> Result<ExpirySweep, SubscriptionRepositoryError>;
        async fn renewal_candidates(
            &self,
            now: DateTime<Utc>,
            until: DateTime<Utc>,
        ) -> Result<Vec<RenewalCandidate>, SubscriptionRepositoryError>;
        async fn has_payment_since(
            &self,
            user_id: UserId,
            payment_type: &str,
            since: DateTime<Utc>,
        ) -> Result<bool, SubscriptionRepositoryError>;
        async fn renew(&self, renewal: Renewal) -> Result<(), SubscriptionRepositoryError>;
    }
}

// Defaults used by the app state builder. Each one fails in a way that
// is easy to recognise if a test reaches it by accident.

pub struct StubSignup;

#[async_trait]
impl ISignupUserUseCase for StubSignup {
    async fn execute(&self, _request: SignupRequest) -> Result<AuthSession, SignupError> {
        Err(SignupError::RepositoryError(NOT_WIRED.into()))
    }
}

pub struct StubLogin;

#[async_trait]
impl ILoginUserUseCase for StubLogin {
    async fn execute(&self, _request: LoginRequest) -> Result<AuthSession, LoginError> {
        Err(LoginError::InvalidCredentials)
    }
}

pub struct StubLogout;

#[async_trait]
impl ILogoutUseCase for StubLogout {
    async fn execute(&self, _request: LogoutRequest) -> Result<(), LogoutError> {
        Ok(())
    }
}

pub struct StubUpdateProfile;

#[async_trait]
impl IUpdateProfileUseCase for StubUpdateProfile {
    async fn execute(
        &self,
        _user_id: UserId,
        _input: UpdateProfileInput,
    ) -> Result<UserAccount, UpdateProfileError> {
        Err(UpdateProfileError::UserNotFound)
    }
}

pub struct StubUpdatePreferences;

#[async_trait]
impl IUpdateNotificationPreferencesUseCase for StubUpdatePreferences {
    async fn execute(
        &self,
        _user_id: UserId,
        _preferences: NotificationPreferences,
    ) -> Result<UserAccount, UpdatePreferencesError> {
        Err(UpdatePreferencesError::UserNotFound)
    }
}

pub struct StubListSavedSearches;

#[async_trait]
impl IListSavedSearchesUseCase for StubListSavedSearches {
    async fn execute(&self, _user_id: UserId) -> Result<Vec<SavedSearch>, ListSavedSearchesError> {
        Ok(vec![])
    }
}

pub struct StubCreateSavedSearch;

#[async_trait]
impl ICreateSavedSearchUseCase for StubCreateSavedSearch {
    async fn execute(&self, _user_id: UserId, _search: NewSavedSearch) -> Result<i32, CreateSavedSearchError> {
        Err(CreateSavedSearchError::InvalidName)
    }
}

pub struct StubListCategories;

#[async_trait]
impl IListCategoriesUseCase for StubListCategories {
    async fn execute(
        &self,
        _request: ListCategoriesRequest,
    ) -> Result<Vec<Category>, ListCategoriesError> {
        Ok(Vec::new())
    }
}

pub struct StubGetCategory;

#[async_trait]
impl IGetCategoryUseCase for StubGetCategory {
    async fn execute(&self, _id: i32) -> Result<Category, GetCategoryError> {
        Err(GetCategoryError::CategoryNotFound)
    }
}

pub struct StubListPosts;

#[async_trait]
impl IListPostsUseCase for StubListPosts {
    async fn execute(&self, request: ListPostsRequest) -> Result<PostPage, ListPostsError> {
        Ok(PostPage {
            items: Vec::new(),
            total: 0,
            skip: request.listing.skip,
            limit: request.listing.limit,
        })
    }
}

pub struct StubRecentPosts;

#[async_trait]
impl IRecentPostsUseCase for StubRecentPosts {
    async fn execute(
        &self,
        _limit: u64,
        _viewer: Option<UserId>,
    ) -> Result<Vec<Post>, RecentPostsError> {
        Ok(Vec::new())
    }
}

pub struct StubGetPost;

#[async_trait]
impl IGetPostUseCase for StubGetPost {
    async fn execute(&self, _id: i32, _viewer: Option<UserId>) -> Result<Post, GetPostError> {
        Err(GetPostError::PostNotFound)
    }
}

pub struct StubMarkRead;

#[async_trait]
impl IMarkPostReadUseCase for StubMarkRead {
    async fn execute(&self, _user_id: UserId, _post_id: i32) -> Result<(), MarkPostReadError> {
        Ok(())
    }
}

pub struct StubDashboard;

#[async_trait]
impl IGetDashboardUseCase for StubDashboard {
    async fn execute(&self, _user_id: UserId) -> Result<Dashboard, GetDashboardError> {
        Err(GetDashboardError::UserNotFound)
    }
}

pub struct StubStats;

#[async_trait]
impl IGetStatsUseCase for StubStats {
    async fn execute(&self) -> Result<SiteStats, GetStatsError> {
        Err(GetStatsError::QueryError(NOT_WIRED.into()))
    }
}

pub struct StubScrapeLogs;

#[async_trait]
impl IListScrapeLogsUseCase for StubScrapeLogs {
    async fn execute(
        &self,
        _status: Option<ScrapeStatus>,
        _limit: u64,
    ) -> Result<Vec<ScrapeLogEntry>, ListScrapeLogsError> {
        Ok(Vec::new())
    }
}

pub struct StubSubscribePush;

#[async_trait]
impl ISubscribePushUseCase for StubSubscribePush {
    async fn execute(
        &self,
        _user_id: UserId,
        _subscription: PushSubscription,
    ) -> Result<(), SubscribePushError> {
        Err(SubscribePushError::UserNotFound)
    }
}

pub struct StubUnsubscribePush;

#[async_trait]
impl IUnsubscribePushUseCase for StubUnsubscribePush {
    async fn execute(&self, _user_id: UserId) -> Result<u64, UnsubscribePushError> {
        Ok(0)
    }
}

pub struct StubNotificationHistory;

#[async_trait]
impl INotificationHistoryUseCase for StubNotificationHistory {
    async fn execute(
        &self,
        _user_id: UserId,
        _limit: u64,
    ) -> Result<Vec<NotificationLogEntry>, NotificationHistoryError> {
        Ok(Vec::new())
    }
}

pub struct StubGetSubscription;

#[async_trait]
impl IGetSubscriptionUseCase for StubGetSubscription {
    async fn execute(&self, _user_id: UserId) -> Result<SubscriptionOverview, GetSubscriptionError> {
        Err(GetSubscriptionError::UserNotFound)
    }
}

pub struct StubCheckout;

#[async_trait]
impl ICreateCheckoutUseCase for StubCheckout {
    async fn execute(&self, _user_id: UserId) -> Result<CheckoutOrder, CreateCheckoutError> {
        Err(CreateCheckoutError::UserNotFound)
    }
}

pub struct StubCancelSubscription;

#[async_trait]
impl ICancelSubscriptionUseCase for StubCancelSubscription {
    async fn execute(
        &self,
        _user_id: UserId,
    ) -> Result<SubscriptionOverview, CancelSubscriptionError> {
        Err(CancelSubscriptionError::NoActiveSubscription)
    }
}

/// Webhook handler with no key configured, so every callback is refused.
pub struct StubWebhook;

#[async_trait]
impl IHandleWebhookUseCase for StubWebhook {
    fn verification_key(&self) -> Option<&str> {
        None
    }

    fn verify(&self, _presented: &str) -> bool {
        false
    }

    async fn execute(&self, _event: WebhookEvent) -> Result<WebhookOutcome, HandleWebhookError> {
        Err(HandleWebhookError::RepositoryError(NOT_WIRED.into()))
    }
}

pub struct StubExpireSubscriptions;

#[async_trait]
impl IExpireSubscriptionsUseCase for StubExpireSubscriptions {
    async fn execute(&self) -> Result<ExpirySweep, ExpireSubscriptionsError> {
        Ok(ExpirySweep {
            expired_users: 0,
            push_subscriptions_removed: 0,
        })
    }
}

pub struct StubRenewSubscriptions;

#[async_trait]
impl IRenewSubscriptionsUseCase for StubRenewSubscriptions {
    async fn execute(&self) -> Result<RenewalRun, RenewSubscriptionsError> {
        Ok(RenewalRun::default())
    }
}

pub struct StubAssistant;

#[async_trait]
impl IAskAssistantUseCase for StubAssistant {
    async fn execute(&self, _message: &str) -> Result<AssistantReply, AskAssistantError> {
        Err(AskAssistantError::EmptyMessage)
    }
}

pub struct StubRecordConsent;

#[async_trait]
impl IRecordConsentUseCase for StubRecordConsent {
    async fn execute(
        &self,
        _request: RecordConsentRequest,
    ) -> Result<ConsentReceipt, RecordConsentError> {
        Err(RecordConsentError::RepositoryError(NOT_WIRED.into()))
    }
}
