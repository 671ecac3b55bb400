use std::sync::Arc;

use crate::{KeyValueStorage, PlatformError, TabMessenger};

/// Host capabilities the popup needs, chosen once at startup and passed
/// explicitly to whoever needs them.
pub trait Platform: Send + Sync {
    fn storage(&self) -> Result<Arc<dyn KeyValueStorage>, PlatformError>;
    fn active_tab_messenger(&self) -> Result<Arc<dyn TabMessenger>, PlatformError>;
}

/// Platform assembled from concrete parts. A missing part reports the
/// matching [`PlatformError`] on every call.
#[derive(Clone, Default)]
pub struct LocalPlatform {
    storage: Option<Arc<dyn KeyValueStorage>>,
    active_tab: Option<Arc<dyn TabMessenger>>,
}

impl LocalPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage(mut self, storage: Arc<dyn KeyValueStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_active_tab(mut self, messenger: Arc<dyn TabMessenger>) -> Self {
        self.active_tab = Some(messenger);
        self
    }
}

impl Platform for LocalPlatform {
    fn storage(&self) -> Result<Arc<dyn KeyValueStorage>, PlatformError> {
        self.storage.clone().ok_or(PlatformError::StorageUnavailable)
    }

    fn active_tab_messenger(&self) -> Result<Arc<dyn TabMessenger>, PlatformError> {
        self.active_tab.clone().ok_or(PlatformError::NoActiveTab)
    }
}
