// Preferences storage abstraction
//
// The bridge only ever talks to `PreferencesStore`. Mobile hosts implement it
// over SharedPreferences / NSUserDefaults through the UniFFI callback
// interface; desktop and tests use the sled and in-memory stores below.

use crate::config::is_valid_preferences_name;
use crate::StorageError;
use anyhow::Context;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// String-keyed persistent store scoped to one application.
pub trait PreferencesStore: Send + Sync {
    /// Store `value` under `key`, replacing whatever was there.
    fn put_string(&self, key: String, value: String) -> Result<(), StorageError>;
    /// Fetch the value for `key`. `Ok(None)` means the key was never written.
    fn get_string(&self, key: String) -> Result<Option<String>, StorageError>;
}

/// In-memory preferences for tests and ephemeral hosts
#[derive(Clone, Default)]
pub struct MemoryPreferences {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl PreferencesStore for MemoryPreferences {
    fn put_string(&self, key: String, value: String) -> Result<(), StorageError> {
        self.data.write().insert(key, value);
        Ok(())
    }

    fn get_string(&self, key: String) -> Result<Option<String>, StorageError> {
        Ok(self.data.read().get(&key).cloned())
    }
}

/// Preferences file backed by a sled database.
///
/// Every write is flushed before returning, so a value that was accepted
/// is still there after the process restarts.
pub struct SledPreferences {
    db: sled::Db,
}

impl SledPreferences {
    /// Open (or create) the preferences file `preferences_name` under `storage_path`.
    pub fn open(storage_path: &Path, preferences_name: &str) -> Result<Self, StorageError> {
        if !is_valid_preferences_name(preferences_name) {
            return Err(StorageError::Io {
                reason: format!("Invalid preferences name: {:?}", preferences_name),
            });
        }

        let path = storage_path.join(preferences_name);
        let db = sled::open(&path)
            .with_context(|| format!("Failed to open preferences at {}", path.display()))?;

        tracing::debug!("Opened preferences file {}", path.display());
        Ok(Self { db })
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

impl PreferencesStore for SledPreferences {
    fn put_string(&self, key: String, value: String) -> Result<(), StorageError> {
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }

    fn get_string(&self, key: String) -> Result<Option<String>, StorageError> {
        match self.db.get(key.as_bytes())? {
            Some(ivec) => {
                let value = String::from_utf8(ivec.to_vec()).map_err(|e| StorageError::Io {
                    reason: format!("Stored value for '{}' is not UTF-8: {}", key, e),
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_preferences() {
        let prefs = MemoryPreferences::new();
        assert!(prefs.is_empty());
        assert_eq!(prefs.get_string("myKey".to_string()).unwrap(), None);

        prefs
            .put_string("myKey".to_string(), "hello".to_string())
            .unwrap();
        assert_eq!(
            prefs.get_string("myKey".to_string()).unwrap(),
            Some("hello".to_string())
        );

        // Clones share the same map
        let other = prefs.clone();
        other
            .put_string("myKey".to_string(), "world".to_string())
            .unwrap();
        assert_eq!(
            prefs.get_string("myKey".to_string()).unwrap(),
            Some("world".to_string())
        );
        assert_eq!(prefs.len(), 1);
    }

    #[test]
    fn test_sled_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SledPreferences::open(dir.path(), "my_prefs").unwrap();

        assert_eq!(prefs.get_string("myKey".to_string()).unwrap(), None);
        prefs
            .put_string("myKey".to_string(), "hello".to_string())
            .unwrap();
        assert_eq!(
            prefs.get_string("myKey".to_string()).unwrap(),
            Some("hello".to_string())
        );
        assert_eq!(prefs.len(), 1);
        assert!(dir.path().join("my_prefs").exists());
    }

    #[test]
    fn test_sled_empty_value_is_not_absent() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SledPreferences::open(dir.path(), "my_prefs").unwrap();

        prefs.put_string("k".to_string(), String::new()).unwrap();
        assert_eq!(
            prefs.get_string("k".to_string()).unwrap(),
            Some(String::new())
        );
    }

    #[test]
    fn test_sled_rejects_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SledPreferences::open(dir.path(), "my_prefs").unwrap();

        prefs.db.insert(b"raw", &[0xff, 0xfe][..]).unwrap();
        let err = prefs.get_string("raw".to_string()).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn test_sled_preferences_stay_inside_storage_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = dir.path().join("storage");
        std::fs::create_dir_all(&storage).unwrap();

        for name in ["..", ".", "../escape", ""] {
            let err = SledPreferences::open(&storage, name)
                .err()
                .expect("name outside the storage dir should be rejected");
            assert!(matches!(err, StorageError::Io { .. }));
        }

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("storage")]);
    }

    #[test]
    fn test_sled_open_failure_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"file").unwrap();

        let err = SledPreferences::open(&blocker, "my_prefs")
            .err()
            .expect("opening under a regular file should fail");
        match err {
            StorageError::Io { reason } => assert!(reason.contains("Failed to open preferences")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
