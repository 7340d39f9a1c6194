pub mod notification_logs;
pub mod push_subscriptions;
