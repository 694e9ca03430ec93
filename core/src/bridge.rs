// Storage bridge exposed to mobile hosts via UniFFI
//
// getString / setString over a PreferencesStore. Absence is not an error:
// an unknown key reads back as the empty string.

use crate::config::{BridgeConfig, FailurePolicy};
use crate::store::{MemoryPreferences, PreferencesStore, SledPreferences};
use crate::StorageError;
use std::path::Path;
use std::sync::Arc;

pub struct NativeLocalStorage {
    store: Arc<dyn PreferencesStore>,
    config: BridgeConfig,
}

impl NativeLocalStorage {
    /// Bridge over a throwaway in-memory store
    pub fn in_memory() -> Self {
        Self::with_config(Arc::new(MemoryPreferences::new()), BridgeConfig::default())
    }

    /// Bridge over the default preferences file under `storage_path`
    pub fn open(storage_path: String) -> Result<Self, StorageError> {
        Self::open_with_config(Path::new(&storage_path), BridgeConfig::default())
    }

    /// Bridge over a platform-supplied store (foreign callback interface)
    pub fn with_store(store: Box<dyn PreferencesStore>) -> Self {
        Self::with_config(Arc::from(store), BridgeConfig::default())
    }

    pub fn open_with_config(
        storage_path: &Path,
        config: BridgeConfig,
    ) -> Result<Self, StorageError> {
        let store = SledPreferences::open(storage_path, &config.preferences_name)?;
        Ok(Self::with_config(Arc::new(store), config))
    }

    pub fn with_config(store: Arc<dyn PreferencesStore>, config: BridgeConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Persist `value` under `key`, overwriting any previous value.
    pub fn set_string(&self, value: String, key: String) -> Result<(), StorageError> {
        tracing::debug!(key = %key, len = value.len(), "setString");

        match self.store.put_string(key.clone(), value) {
            Ok(()) => Ok(()),
            Err(e) => match self.config.failure_policy {
                FailurePolicy::Propagate => {
                    tracing::error!(key = %key, "setString failed: {}", e);
                    Err(e)
                }
                FailurePolicy::Ignore => {
                    tracing::warn!(key = %key, "setString failed, ignoring: {}", e);
                    Ok(())
                }
            },
        }
    }

    /// Read the value stored under `key`, or "" if nothing was ever written.
    pub fn get_string(&self, key: String) -> Result<String, StorageError> {
        tracing::debug!(key = %key, "getString");

        match self.store.get_string(key.clone()) {
            Ok(value) => Ok(value.unwrap_or_default()),
            Err(e) => match self.config.failure_policy {
                FailurePolicy::Propagate => {
                    tracing::error!(key = %key, "getString failed: {}", e);
                    Err(e)
                }
                FailurePolicy::Ignore => {
                    tracing::warn!(key = %key, "getString failed, returning default: {}", e);
                    Ok(String::new())
                }
            },
        }
    }
}
