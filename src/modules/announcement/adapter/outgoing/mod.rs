pub mod category_query_postgres;
pub mod post_query_postgres;
pub mod read_tracker_postgres;
pub mod scrape_log_query_postgres;
pub mod sea_orm_entity;

pub use category_query_postgres::CategoryQueryPostgres;
pub use post_query_postgres::PostQueryPostgres;
pub use read_tracker_postgres::ReadTrackerPostgres;
pub use scrape_log_query_postgres::ScrapeLogQueryPostgres;
