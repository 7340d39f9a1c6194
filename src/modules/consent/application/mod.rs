pub mod consent_use_cases;
pub mod domain;
pub mod ports;
pub mod use_cases;

pub use consent_use_cases::ConsentUseCases;
