pub mod billing_use_cases;
pub mod domain;
pub mod ports;
pub mod use_cases;

pub use billing_use_cases::BillingUseCases;
