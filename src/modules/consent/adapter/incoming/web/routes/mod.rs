pub mod consent;

pub use consent::{consent_defaults_handler, record_consent_handler};
