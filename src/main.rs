use std::env;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use deadpool_redis::{Config, Runtime};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use drugalert::announcement::adapter::outgoing::{
    CategoryQueryPostgres, PostQueryPostgres, ReadTrackerPostgres, ScrapeLogQueryPostgres,
};
use drugalert::announcement::application::use_cases::{
    get_category::GetCategoryUseCase, get_dashboard::GetDashboardUseCase,
    get_post::GetPostUseCase, get_stats::GetStatsUseCase, list_categories::ListCategoriesUseCase,
    list_posts::ListPostsUseCase, list_scrape_logs::ListScrapeLogsUseCase,
    mark_post_read::MarkPostReadUseCase, recent_posts::{IRecentPostsUseCase, RecentPostsUseCase},
};
use drugalert::announcement::application::AnnouncementUseCases;
use drugalert::api::openapi::ApiDoc;
use drugalert::assistant::adapter::outgoing::PostArticleSearch;
use drugalert::assistant::application::use_cases::ask_assistant::AskAssistantUseCase;
use drugalert::assistant::application::AssistantUseCases;
use drugalert::auth::adapter::outgoing::{
    Argon2Hasher, JwtConfig, JwtTokenService, LegacyAwareHasher, RedisTokenBlacklist,
    SavedSearchRepositoryPostgres, UserQueryPostgres, UserRepositoryPostgres,
};
use drugalert::auth::application::domain::entities::DEFAULT_TRIAL_DAYS;
use drugalert::auth::application::ports::outgoing::{PasswordHasher, TokenBlacklist, TokenProvider};
use drugalert::auth::application::use_cases::{
    create_saved_search::CreateSavedSearchUseCase,
    get_current_user::{GetCurrentUserUseCase, IGetCurrentUserUseCase},
    list_saved_searches::ListSavedSearchesUseCase,
    login_user::LoginUserUseCase,
    logout_user::LogoutUseCase,
    signup_user::SignupUserUseCase,
    update_notification_preferences::UpdateNotificationPreferencesUseCase,
    update_profile::UpdateProfileUseCase,
};
use drugalert::auth::application::AuthUseCases;
use drugalert::billing::adapter::outgoing::{SubscriptionRepositoryPostgres, VivaConfig, VivaGateway};
use drugalert::billing::application::use_cases::{
    cancel_subscription::CancelSubscriptionUseCase,
    create_checkout::CreateCheckoutUseCase,
    expire_subscriptions::{ExpireSubscriptionsUseCase, IExpireSubscriptionsUseCase},
    get_subscription::GetSubscriptionUseCase,
    handle_webhook::HandleWebhookUseCase,
    renew_subscriptions::{IRenewSubscriptionsUseCase, RenewSubscriptionsUseCase},
};
use drugalert::billing::application::BillingUseCases;
use drugalert::consent::adapter::outgoing::ConsentRepositoryPostgres;
use drugalert::consent::application::use_cases::{
    consent_defaults::ConsentDefaultsUseCase, record_consent::RecordConsentUseCase,
};
use drugalert::consent::application::ConsentUseCases;
use drugalert::notification::adapter::outgoing::{
    NotificationHistoryQueryPostgres, PushSubscriptionRepositoryPostgres,
};
use drugalert::notification::application::domain::vapid::VapidConfig;
use drugalert::notification::application::use_cases::{
    notification_history::NotificationHistoryUseCase, subscribe_push::SubscribePushUseCase,
    unsubscribe_push::UnsubscribePushUseCase,
};
use drugalert::notification::application::NotificationUseCases;
use drugalert::scheduler::{Scheduler, SchedulerConfig};
use drugalert::scraper::adapter::outgoing::{HttpPageFetcher, ScrapeStorePostgres, ScraperConfig};
use drugalert::scraper::application::domain::catalogue::EOF_CATALOGUE;
use drugalert::scraper::application::use_cases::{IRunScrapeUseCase, RunScrapeUseCase};
use drugalert::shared::api::{custom_json_config, custom_query_config};
use drugalert::{init_routes, AppState};

fn load_env_files() {
    let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{env}");
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{key} is not set"))
}

#[cfg(not(tarpaulin_include))]
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_env_files();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // reqwest and redis both build rustls clients.
    let _ = rustls::crypto::ring::default_provider().install_default();

    info!("Starting DrugAlert.gr backend");

    let db_url = required("DATABASE_URL")?;
    let redis_url = required("REDIS_URL")?;
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let server_url = format!("{host}:{port}");

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&conn, None)
        .await
        .context("Failed to run migrations")?;
    let db = Arc::new(conn);

    // Redis connection
    let redis_pool = Config::from_url(&redis_url)
        .create_pool(Some(Runtime::Tokio1))
        .context("Failed to create Redis pool")?;
    let redis = Arc::new(redis_pool);

    // Auth
    let jwt_service = JwtTokenService::new(JwtConfig::from_env());
    let token_provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let blacklist: Arc<dyn TokenBlacklist + Send + Sync> =
        Arc::new(RedisTokenBlacklist::new(Arc::clone(&redis)));
    let hasher: Arc<dyn PasswordHasher> =
        Arc::new(LegacyAwareHasher::new(Argon2Hasher::from_env()));

    let user_query = UserQueryPostgres::new(Arc::clone(&db));
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db));
    let saved_searches = SavedSearchRepositoryPostgres::new(Arc::clone(&db));

    let current_user: Arc<dyn IGetCurrentUserUseCase + Send + Sync> = Arc::new(
        GetCurrentUserUseCase::new(user_query.clone(), user_repo.clone()),
    );

    let auth = AuthUseCases {
        signup: Arc::new(SignupUserUseCase::new(
            user_repo.clone(),
            Arc::clone(&hasher),
            token_provider.clone(),
            DEFAULT_TRIAL_DAYS,
        )),
        login: Arc::new(LoginUserUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            Arc::clone(&hasher),
            token_provider.clone(),
        )),
        logout: Arc::new(LogoutUseCase::new(blacklist.clone(), token_provider.clone())),
        current_user: Arc::clone(&current_user),
        update_profile: Arc::new(UpdateProfileUseCase::new(user_repo.clone())),
        update_preferences: Arc::new(UpdateNotificationPreferencesUseCase::new(
            user_query.clone(),
            user_repo.clone(),
        )),
        list_saved_searches: Arc::new(ListSavedSearchesUseCase::new(saved_searches.clone())),
        create_saved_search: Arc::new(CreateSavedSearchUseCase::new(saved_searches)),
    };

    // Announcements
    let post_query = PostQueryPostgres::new(Arc::clone(&db));
    let category_query = CategoryQueryPostgres::new(Arc::clone(&db));
    let read_tracker = ReadTrackerPostgres::new(Arc::clone(&db));

    let recent_posts: Arc<dyn IRecentPostsUseCase + Send + Sync> = Arc::new(
        RecentPostsUseCase::new(post_query.clone(), read_tracker.clone()),
    );

    let announcement = AnnouncementUseCases {
        list_categories: Arc::new(ListCategoriesUseCase::new(category_query.clone())),
        get_category: Arc::new(GetCategoryUseCase::new(category_query.clone())),
        list_posts: Arc::new(ListPostsUseCase::new(post_query.clone(), read_tracker.clone())),
        recent_posts: Arc::clone(&recent_posts),
        get_post: Arc::new(GetPostUseCase::new(post_query.clone(), read_tracker.clone())),
        mark_read: Arc::new(MarkPostReadUseCase::new(read_tracker.clone())),
        dashboard: Arc::new(GetDashboardUseCase::new(
            Arc::clone(&current_user),
            recent_posts,
            post_query.clone(),
            category_query,
            read_tracker,
        )),
        stats: Arc::new(GetStatsUseCase::new(post_query.clone())),
        scrape_logs: Arc::new(ListScrapeLogsUseCase::new(ScrapeLogQueryPostgres::new(
            Arc::clone(&db),
        ))),
    };

    // Notifications
    let push_repo = PushSubscriptionRepositoryPostgres::new(Arc::clone(&db));
    let notification = NotificationUseCases {
        subscribe: Arc::new(SubscribePushUseCase::new(
            Arc::clone(&current_user),
            push_repo.clone(),
        )),
        unsubscribe: Arc::new(UnsubscribePushUseCase::new(push_repo)),
        history: Arc::new(NotificationHistoryUseCase::new(
            NotificationHistoryQueryPostgres::new(Arc::clone(&db)),
        )),
        vapid: VapidConfig::from_env(),
    };

    // Billing
    let viva_config = VivaConfig::from_env();
    info!(config = ?viva_config, "Viva Wallet configured");
    let webhook_key = viva_config.webhook_verification_key.clone();
    let gateway = VivaGateway::new(viva_config).context("Failed to build Viva client")?;
    let subscriptions = SubscriptionRepositoryPostgres::new(Arc::clone(&db));

    let expire: Arc<dyn IExpireSubscriptionsUseCase + Send + Sync> =
        Arc::new(ExpireSubscriptionsUseCase::new(subscriptions.clone()));
    let renew: Arc<dyn IRenewSubscriptionsUseCase + Send + Sync> = Arc::new(
        RenewSubscriptionsUseCase::new(subscriptions.clone(), gateway.clone()),
    );

    let billing = BillingUseCases {
        subscription: Arc::new(GetSubscriptionUseCase::new(Arc::clone(&current_user))),
        checkout: Arc::new(CreateCheckoutUseCase::new(
            Arc::clone(&current_user),
            gateway.clone(),
            subscriptions.clone(),
        )),
        cancel: Arc::new(CancelSubscriptionUseCase::new(
            Arc::clone(&current_user),
            gateway,
            subscriptions.clone(),
        )),
        webhook: Arc::new(HandleWebhookUseCase::new(webhook_key, subscriptions)),
        expire: Arc::clone(&expire),
        renew: Arc::clone(&renew),
    };

    // Assistant and consent
    let assistant = AssistantUseCases {
        ask: Arc::new(AskAssistantUseCase::new(PostArticleSearch::new(post_query))),
    };
    let consent = ConsentUseCases {
        defaults: Arc::new(ConsentDefaultsUseCase),
        record: Arc::new(RecordConsentUseCase::new(ConsentRepositoryPostgres::new(
            Arc::clone(&db),
        ))),
    };

    // Scraper and background jobs
    let scraper_config = ScraperConfig::from_env();
    let fetcher = HttpPageFetcher::new(&scraper_config).context("Failed to build HTTP client")?;
    let run_scrape: Arc<dyn IRunScrapeUseCase + Send + Sync> = Arc::new(RunScrapeUseCase::new(
        fetcher,
        ScrapeStorePostgres::new(Arc::clone(&db)),
        scraper_config.settings(),
        EOF_CATALOGUE,
    ));
    let scheduler = Scheduler::new(SchedulerConfig::from_env(), run_scrape, expire, renew).spawn();

    let state = AppState {
        auth,
        announcement,
        notification,
        billing,
        assistant,
        consent,
    };

    info!(%server_url, "HTTP server listening");
    let openapi = ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&blacklist)))
            .app_data(web::Data::new(Arc::clone(&db)))
            .app_data(web::Data::new(Arc::clone(&redis)))
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind(&server_url)
    .with_context(|| format!("Failed to bind {server_url}"))?
    .run()
    .await?;

    info!("HTTP server stopped, shutting down background jobs");
    scheduler.shutdown().await;

    Ok(())
}
