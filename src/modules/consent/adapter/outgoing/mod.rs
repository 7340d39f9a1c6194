pub mod consent_repository_postgres;
pub mod sea_orm_entity;

pub use consent_repository_postgres::ConsentRepositoryPostgres;
