pub mod notification_history_query;
pub mod push_subscription_repository;

pub use notification_history_query::{NotificationHistoryQuery, NotificationHistoryQueryError};
pub use push_subscription_repository::{
    PushSubscriptionRepository, PushSubscriptionRepositoryError,
};
