pub mod consent_repository;

pub use consent_repository::{ConsentRepository, ConsentRepositoryError, NewConsentRecord};
