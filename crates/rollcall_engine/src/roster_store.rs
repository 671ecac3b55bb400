use std::sync::Arc;

use rollcall_logging::{rollcall_debug, rollcall_error, rollcall_warn};
use serde_json::Value;

use crate::{KeyValueStorage, StorageError};

/// Storage key holding the roster as an ordered list of strings.
pub const ROSTER_KEY: &str = "userList";

/// Reads and writes the roster list. Failures are logged and never retried.
#[derive(Clone)]
pub struct RosterStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl RosterStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            key: ROSTER_KEY.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored roster, or an empty one when the key is absent or unreadable.
    pub async fn load(&self) -> Vec<String> {
        match self.try_load().await {
            Ok(names) => {
                rollcall_debug!("Loaded {} roster entries", names.len());
                names
            }
            Err(err) => {
                rollcall_error!("Failed to load roster: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn try_load(&self) -> Result<Vec<String>, StorageError> {
        let Some(value) = self.storage.get(&self.key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_value::<Vec<String>>(value) {
            Ok(names) => Ok(names),
            Err(err) => {
                rollcall_warn!("Stored roster under {:?} has unexpected shape: {}", self.key, err);
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the stored roster. The in-memory roster is never rolled back.
    pub async fn save(&self, names: &[String]) {
        if let Err(err) = self.try_save(names).await {
            rollcall_error!("Failed to save roster: {}", err);
        }
    }

    pub async fn try_save(&self, names: &[String]) -> Result<(), StorageError> {
        let value = Value::from(names.to_vec());
        self.storage.set(&self.key, value).await
    }
}
