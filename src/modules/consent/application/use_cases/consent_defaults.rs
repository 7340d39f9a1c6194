use serde::Serialize;
use utoipa::ToSchema;

use crate::consent::application::domain::{
    consent_state::ConsentState,
    region::{is_eu_timezone, should_show_banner},
};

/// What a first-time visitor starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ConsentDefaults {
    pub state: ConsentState,
    pub show_banner: bool,
    pub is_eu: bool,
}

pub trait IConsentDefaultsUseCase: Send + Sync {
    fn execute(&self, timezone: Option<&str>) -> ConsentDefaults;
}

#[derive(Clone, Copy, Default)]
pub struct ConsentDefaultsUseCase;

impl IConsentDefaultsUseCase for ConsentDefaultsUseCase {
    fn execute(&self, timezone: Option<&str>) -> ConsentDefaults {
        let is_eu = is_eu_timezone(timezone);
        ConsentDefaults {
            state: ConsentState::default(),
            show_banner: should_show_banner(false, is_eu),
            is_eu,
        }
    }
}
