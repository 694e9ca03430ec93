// Native module registry
//
// Hosts register the storage bridge by name at startup. Consumers resolve it
// once and keep the Arc; a missing module is reported there, not at the first
// getString call.

use crate::bridge::NativeLocalStorage;
use crate::StorageError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Name the storage bridge is registered under.
pub const MODULE_NAME: &str = "NativeLocalStorage";

#[derive(Default)]
pub struct ModuleRegistry {
    modules: RwLock<HashMap<String, Arc<NativeLocalStorage>>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `module` bound under [`MODULE_NAME`]
    pub fn with_module(module: NativeLocalStorage) -> Self {
        let registry = Self::new();
        registry.register(MODULE_NAME, module);
        registry
    }

    /// Bind `module` under `name`, replacing any previous binding.
    pub fn register(&self, name: &str, module: NativeLocalStorage) {
        let previous = self
            .modules
            .write()
            .insert(name.to_string(), Arc::new(module));

        if previous.is_some() {
            tracing::warn!("Native module {} re-registered", name);
        } else {
            tracing::debug!("Native module {} registered", name);
        }
    }

    /// Look up a module; `None` if the host never registered it.
    pub fn get(&self, name: &str) -> Option<Arc<NativeLocalStorage>> {
        self.modules.read().get(name).cloned()
    }

    /// Look up a module the caller cannot run without.
    pub fn get_enforcing(&self, name: &str) -> Result<Arc<NativeLocalStorage>, StorageError> {
        self.get(name).ok_or_else(|| {
            tracing::error!("Native module {} is not registered", name);
            StorageError::ModuleNotRegistered {
                name: name.to_string(),
            }
        })
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.modules.read().contains_key(name)
    }
}
