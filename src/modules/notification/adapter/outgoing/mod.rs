pub mod notification_history_query_postgres;
pub mod push_subscription_repository_postgres;
pub mod sea_orm_entity;

pub use notification_history_query_postgres::NotificationHistoryQueryPostgres;
pub use push_subscription_repository_postgres::PushSubscriptionRepositoryPostgres;
