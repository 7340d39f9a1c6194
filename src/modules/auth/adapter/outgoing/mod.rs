pub mod jwt;
pub mod saved_search_repository_postgres;
pub mod sea_orm_entity;
pub mod security;
pub mod token_blacklist_redis;
pub mod user_query_postgres;
pub mod user_repository_postgres;

pub use jwt::{JwtConfig, JwtTokenService};
pub use saved_search_repository_postgres::SavedSearchRepositoryPostgres;
pub use security::{Argon2Hasher, BcryptHasher, LegacyAwareHasher};
pub use token_blacklist_redis::RedisTokenBlacklist;
pub use user_query_postgres::UserQueryPostgres;
pub use user_repository_postgres::UserRepositoryPostgres;
