pub mod sea_orm_entity;
pub mod subscription_repository_postgres;
pub mod viva;

pub use subscription_repository_postgres::SubscriptionRepositoryPostgres;
pub use viva::{VivaConfig, VivaGateway};
