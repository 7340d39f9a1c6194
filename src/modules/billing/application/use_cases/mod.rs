pub mod cancel_subscription;
pub mod create_checkout;
pub mod expire_subscriptions;
pub mod get_subscription;
pub mod handle_webhook;
pub mod renew_subscriptions;
