pub mod announcement;
pub mod assistant;
pub mod auth;
pub mod billing;
pub mod consent;
pub mod notification;
pub mod scraper;
