pub mod payment_gateway;
pub mod subscription_repository;

pub use payment_gateway::{PaymentGateway, PaymentGatewayError};
pub use subscription_repository::{SubscriptionRepository, SubscriptionRepositoryError};
