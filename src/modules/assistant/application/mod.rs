pub mod assistant_use_cases;
pub mod domain;
pub mod ports;
pub mod use_cases;

pub use assistant_use_cases::AssistantUseCases;
