pub mod notification_history;
pub mod subscribe_push;
pub mod unsubscribe_push;
