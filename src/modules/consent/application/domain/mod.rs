pub mod consent_state;
pub mod region;
