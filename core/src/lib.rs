// NativeStore Core — Native Key/Value Storage Bridge
//
// One string stored under one key, persisted by whatever platform store the
// host hands us. The bridge is resolved once at startup and passed down;
// nothing looks modules up at call sites.

pub mod bridge;
pub mod config;
pub mod registry;
pub mod shell;
pub mod store;

use thiserror::Error;

pub use bridge::NativeLocalStorage;
pub use config::{BridgeConfig, FailurePolicy};
pub use registry::{ModuleRegistry, MODULE_NAME};
pub use shell::StorageScreen;
pub use store::{MemoryPreferences, PreferencesStore, SledPreferences};

// UniFFI scaffolding
uniffi::include_scaffolding!("api");

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Native module not registered: {name}")]
    ModuleNotRegistered { name: String },
    #[error("Storage I/O error: {reason}")]
    Io { reason: String },
    #[error("Platform store callback failed: {reason}")]
    Callback { reason: String },
}

impl StorageError {
    pub(crate) fn io(err: impl std::fmt::Display) -> Self {
        StorageError::Io {
            reason: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for StorageError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the context chain on one line
        StorageError::Io {
            reason: format!("{:#}", err),
        }
    }
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        StorageError::io(err)
    }
}

impl From<uniffi::UnexpectedUniFFICallbackError> for StorageError {
    fn from(err: uniffi::UnexpectedUniFFICallbackError) -> Self {
        StorageError::Callback { reason: err.reason }
    }
}

/// Name the storage bridge is registered under.
pub fn module_name() -> String {
    MODULE_NAME.to_string()
}
