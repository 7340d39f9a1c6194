pub mod subscription;
pub mod webhook;

pub use subscription::{cancel_subscription_handler, checkout_handler, subscription_handler};
pub use webhook::{viva_webhook_handler, viva_webhook_verification_handler};
