pub mod domain;
pub mod notification_use_cases;
pub mod ports;
pub mod use_cases;

pub use notification_use_cases::NotificationUseCases;
