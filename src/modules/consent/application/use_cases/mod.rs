pub mod consent_defaults;
pub mod record_consent;
