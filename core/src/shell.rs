// Headless UI shell for the storage screen
//
// Holds the last-loaded value and the edit buffer. Loads once on mount and
// writes on save; the display is updated optimistically after a save without
// reading the store back.

use crate::bridge::NativeLocalStorage;
use crate::registry::{ModuleRegistry, MODULE_NAME};
use crate::StorageError;
use std::sync::Arc;

/// Key the screen reads and writes.
pub const STORAGE_KEY: &str = "myKey";

/// Text input placeholder.
pub const PLACEHOLDER: &str = "Enter the text you want to store";

const NO_VALUE: &str = "No Value";

pub struct StorageScreen {
    storage: Arc<NativeLocalStorage>,
    value: Option<String>,
    editing_value: Option<String>,
}

impl StorageScreen {
    pub fn new(storage: Arc<NativeLocalStorage>) -> Self {
        Self {
            storage,
            value: None,
            editing_value: None,
        }
    }

    /// Resolve the storage bridge from `registry`, failing if it is missing.
    pub fn from_registry(registry: &ModuleRegistry) -> Result<Self, StorageError> {
        Ok(Self::new(registry.get_enforcing(MODULE_NAME)?))
    }

    /// Initial load of the stored value.
    pub fn mount(&mut self) -> Result<(), StorageError> {
        let stored = self.storage.get_string(STORAGE_KEY.to_string())?;
        tracing::debug!("Loaded stored value ({} bytes)", stored.len());
        self.value = Some(stored);
        Ok(())
    }

    pub fn on_change_text(&mut self, text: impl Into<String>) {
        self.editing_value = Some(text.into());
    }

    /// Write the edit buffer and show it. An untouched buffer saves "".
    pub fn save(&mut self) -> Result<(), StorageError> {
        let to_store = self.editing_value.clone().unwrap_or_default();
        self.storage.set_string(to_store, STORAGE_KEY.to_string())?;

        self.value = self.editing_value.clone();
        Ok(())
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn editing_value(&self) -> Option<&str> {
        self.editing_value.as_deref()
    }

    /// Label text; an absent or empty value shows as "No Value".
    pub fn display_text(&self) -> String {
        let shown = match self.value.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => NO_VALUE,
        };
        format!("Current stored value is: {}", shown)
    }
}
