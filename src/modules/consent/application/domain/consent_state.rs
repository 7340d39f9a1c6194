use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConsentValue {
    Granted,
    Denied,
}

impl ConsentValue {
    pub fn toggled(self) -> Self {
        match self {
            ConsentValue::Granted => ConsentValue::Denied,
            ConsentValue::Denied => ConsentValue::Granted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConsentFlag {
    AnalyticsStorage,
    AdStorage,
    AdUserData,
    AdPersonalization,
    FunctionalityStorage,
    PersonalizationStorage,
    SecurityStorage,
}

impl ConsentFlag {
    pub const ALL: [ConsentFlag; 7] = [
        ConsentFlag::AnalyticsStorage,
        ConsentFlag::AdStorage,
        ConsentFlag::AdUserData,
        ConsentFlag::AdPersonalization,
        ConsentFlag::FunctionalityStorage,
        ConsentFlag::PersonalizationStorage,
        ConsentFlag::SecurityStorage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentFlag::AnalyticsStorage => "analytics_storage",
            ConsentFlag::AdStorage => "ad_storage",
            ConsentFlag::AdUserData => "ad_user_data",
            ConsentFlag::AdPersonalization => "ad_personalization",
            ConsentFlag::FunctionalityStorage => "functionality_storage",
            ConsentFlag::PersonalizationStorage => "personalization_storage",
            ConsentFlag::SecurityStorage => "security_storage",
        }
    }
}

/// Tag-manager consent mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConsentState {
    pub analytics_storage: ConsentValue,
    pub ad_storage: ConsentValue,
    pub ad_user_data: ConsentValue,
    pub ad_personalization: ConsentValue,
    pub functionality_storage: ConsentValue,
    pub personalization_storage: ConsentValue,
    pub security_storage: ConsentValue,
}

impl Default for ConsentState {
    /// Tracking and advertising denied, site functionality granted.
    fn default() -> Self {
        Self::reject_all()
    }
}

impl ConsentState {
    pub fn accept_all() -> Self {
        Self::uniform(ConsentValue::Granted, ConsentValue::Granted)
    }

    /// Denies analytics and advertising; functional storage stays granted.
    pub fn reject_all() -> Self {
        Self::uniform(ConsentValue::Denied, ConsentValue::Granted)
    }

    fn uniform(tracking: ConsentValue, functional: ConsentValue) -> Self {
        Self {
            analytics_storage: tracking,
            ad_storage: tracking,
            ad_user_data: tracking,
            ad_personalization: tracking,
            functionality_storage: functional,
            personalization_storage: functional,
            security_storage: functional,
        }
    }

    fn slot(&mut self, flag: ConsentFlag) -> &mut ConsentValue {
        match flag {
            ConsentFlag::AnalyticsStorage => &mut self.analytics_storage,
            ConsentFlag::AdStorage => &mut self.ad_storage,
            ConsentFlag::AdUserData => &mut self.ad_user_data,
            ConsentFlag::AdPersonalization => &mut self.ad_personalization,
            ConsentFlag::FunctionalityStorage => &mut self.functionality_storage,
            ConsentFlag::PersonalizationStorage => &mut self.personalization_storage,
            ConsentFlag::SecurityStorage => &mut self.security_storage,
        }
    }

    pub fn get(&self, flag: ConsentFlag) -> ConsentValue {
        match flag {
            ConsentFlag::AnalyticsStorage => self.analytics_storage,
            ConsentFlag::AdStorage => self.ad_storage,
            ConsentFlag::AdUserData => self.ad_user_data,
            ConsentFlag::AdPersonalization => self.ad_personalization,
            ConsentFlag::FunctionalityStorage => self.functionality_storage,
            ConsentFlag::PersonalizationStorage => self.personalization_storage,
            ConsentFlag::SecurityStorage => self.security_storage,
        }
    }

    pub fn set(&mut self, flag: ConsentFlag, value: ConsentValue) {
        *self.slot(flag) = value;
    }

    pub fn toggle(&mut self, flag: ConsentFlag) {
        let slot = self.slot(flag);
        *slot = slot.toggled();
    }

    /// Arguments of the tag-manager call `gtag('consent', 'update', {...})`.
    pub fn update_event(&self) -> Value {
        let flags: serde_json::Map<String, Value> = ConsentFlag::ALL
            .iter()
            .map(|flag| (flag.as_str().to_string(), json!(self.get(*flag))))
            .collect();
        json!(["consent", "update", flags])
    }
}
