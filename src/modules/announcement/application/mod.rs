pub mod announcement_use_cases;
pub mod domain;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use announcement_use_cases::AnnouncementUseCases;
