pub mod history;
pub mod push_subscription;
pub mod vapid;

pub use history::notification_history_handler;
pub use push_subscription::{subscribe_push_handler, unsubscribe_push_handler};
pub use vapid::vapid_public_key_handler;
