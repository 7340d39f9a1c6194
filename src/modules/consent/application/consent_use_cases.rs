use std::sync::Arc;

use crate::consent::application::use_cases::{
    consent_defaults::IConsentDefaultsUseCase, record_consent::IRecordConsentUseCase,
};

#[derive(Clone)]
pub struct ConsentUseCases {
    pub defaults: Arc<dyn IConsentDefaultsUseCase + Send + Sync>,
    pub record: Arc<dyn IRecordConsentUseCase + Send + Sync>,
}
