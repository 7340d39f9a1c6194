use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::storage::{JsonFile, StorageError};
use crate::consent::application::domain::consent_state::{ConsentFlag, ConsentState};
use crate::consent::application::domain::region::{is_eu_timezone, should_show_banner};

/// The locally remembered decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConsent {
    pub state: ConsentState,
    pub timestamp: DateTime<Utc>,
}

pub trait ConsentStorage: Send + Sync {
    fn load(&self) -> Result<Option<StoredConsent>, StorageError>;
    fn save(&self, consent: &StoredConsent) -> Result<(), StorageError>;
}

pub struct FileConsentStorage {
    file: JsonFile<StoredConsent>,
}

impl FileConsentStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }
}

impl ConsentStorage for FileConsentStorage {
    fn load(&self) -> Result<Option<StoredConsent>, StorageError> {
        self.file.load()
    }

    fn save(&self, consent: &StoredConsent) -> Result<(), StorageError> {
        self.file.save(consent)
    }
}

/// Receiver of consent-mode updates, e.g. a page's `gtag` function.
pub trait TagManager: Send + Sync {
    fn push(&self, event: Value);
}

pub struct ConsentManager<S, T>
where
    S: ConsentStorage,
    T: TagManager,
{
    storage: S,
    tags: Option<T>,
    state: ConsentState,
    has_stored: bool,
    is_eu: bool,
}

impl<S, T> ConsentManager<S, T>
where
    S: ConsentStorage,
    T: TagManager,
{
    /// Restores a stored decision and replays it to the tag manager.
    /// Without one the defaults apply and nothing is forwarded.
    pub fn load(storage: S, tags: Option<T>, timezone: Option<&str>) -> Self {
        let stored = match storage.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable stored consent");
                None
            }
        };

        let manager = Self {
            storage,
            tags,
            state: stored.map(|s| s.state).unwrap_or_default(),
            has_stored: stored.is_some(),
            is_eu: is_eu_timezone(timezone),
        };

        if manager.has_stored {
            manager.forward();
        }
        manager
    }

    pub fn state(&self) -> &ConsentState {
        &self.state
    }

    pub fn is_eu(&self) -> bool {
        self.is_eu
    }

    pub fn show_banner(&self) -> bool {
        should_show_banner(self.has_stored, self.is_eu)
    }

    /// Changes one flag in the pending state; [`Self::save`] applies it.
    pub fn toggle(&mut self, flag: ConsentFlag) {
        self.state.toggle(flag);
    }

    pub fn accept_all(&mut self) -> Result<(), StorageError> {
        self.state = ConsentState::accept_all();
        self.save()
    }

    pub fn reject_all(&mut self) -> Result<(), StorageError> {
        self.state = ConsentState::reject_all();
        self.save()
    }

    /// Applies the current state: the tag manager is updated even if
    /// writing it to storage fails.
    pub fn save(&mut self) -> Result<(), StorageError> {
        self.forward();
        self.has_stored = true;

        self.storage.save(&StoredConsent {
            state: self.state,
            timestamp: Utc::now(),
        })
    }

    fn forward(&self) {
        match &self.tags {
            Some(tags) => tags.push(self.state.update_event()),
            None => debug!("No tag manager, consent update not forwarded"),
        }
    }
}
