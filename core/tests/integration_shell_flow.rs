use nativestore_core::shell::STORAGE_KEY;
use nativestore_core::{
    BridgeConfig, FailurePolicy, ModuleRegistry, NativeLocalStorage, PreferencesStore,
    StorageError, StorageScreen, MODULE_NAME,
};
use std::sync::Arc;

/// Store that cannot be read at all, like a revoked permission.
struct UnreadablePreferences;

impl PreferencesStore for UnreadablePreferences {
    fn put_string(&self, _key: String, _value: String) -> Result<(), StorageError> {
        Ok(())
    }

    fn get_string(&self, _key: String) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io {
            reason: "Permission denied".to_string(),
        })
    }
}

/// Store whose writes always fail, like a full disk.
struct ReadOnlyPreferences;

impl PreferencesStore for ReadOnlyPreferences {
    fn put_string(&self, _key: String, _value: String) -> Result<(), StorageError> {
        Err(StorageError::Io {
            reason: "Read-only file system".to_string(),
        })
    }

    fn get_string(&self, _key: String) -> Result<Option<String>, StorageError> {
        Ok(Some("persisted".to_string()))
    }
}

fn read_only_registry(policy: FailurePolicy) -> ModuleRegistry {
    let config = BridgeConfig {
        failure_policy: policy,
        ..BridgeConfig::default()
    };
    ModuleRegistry::with_module(NativeLocalStorage::with_config(
        Arc::new(ReadOnlyPreferences),
        config,
    ))
}

#[test]
fn test_value_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_str().unwrap().to_string();

    {
        let storage = NativeLocalStorage::open(path.clone()).unwrap();
        let registry = ModuleRegistry::with_module(storage);
        let mut screen = StorageScreen::from_registry(&registry).unwrap();
        screen.mount().unwrap();
        assert_eq!(screen.display_text(), "Current stored value is: No Value");

        screen.on_change_text("hello");
        screen.save().unwrap();
        assert_eq!(screen.display_text(), "Current stored value is: hello");
    }

    // App restart: fresh registry and screen over the same directory
    let registry = ModuleRegistry::with_module(NativeLocalStorage::open(path).unwrap());
    let mut screen = StorageScreen::from_registry(&registry).unwrap();
    screen.mount().unwrap();
    assert_eq!(screen.display_text(), "Current stored value is: hello");
}

#[test]
fn test_missing_module_fails_at_startup() {
    let registry = ModuleRegistry::new();
    registry.register("SomethingElse", NativeLocalStorage::in_memory());

    match StorageScreen::from_registry(&registry) {
        Err(StorageError::ModuleNotRegistered { name }) => assert_eq!(name, MODULE_NAME),
        Err(other) => panic!("unexpected error: {:?}", other),
        Ok(_) => panic!("screen should not start without the storage module"),
    }
}

#[test]
fn test_failed_save_propagates_and_keeps_display() {
    let registry = read_only_registry(FailurePolicy::Propagate);
    let mut screen = StorageScreen::from_registry(&registry).unwrap();
    screen.mount().unwrap();

    screen.on_change_text("new");
    assert!(matches!(screen.save(), Err(StorageError::Io { .. })));
    assert_eq!(screen.display_text(), "Current stored value is: persisted");
}

#[test]
fn test_failed_save_ignored_diverges_from_store() {
    let registry = read_only_registry(FailurePolicy::Ignore);
    let mut screen = StorageScreen::from_registry(&registry).unwrap();
    screen.mount().unwrap();

    screen.on_change_text("new");
    screen.save().unwrap();
    assert_eq!(screen.display_text(), "Current stored value is: new");

    // The store never took the write
    let storage = registry.get_enforcing(MODULE_NAME).unwrap();
    assert_eq!(
        storage.get_string(STORAGE_KEY.to_string()).unwrap(),
        "persisted"
    );
}

#[test]
fn test_failed_mount_propagates_and_shows_no_value() {
    let registry = ModuleRegistry::with_module(NativeLocalStorage::with_config(
        Arc::new(UnreadablePreferences),
        BridgeConfig::default(),
    ));
    let mut screen = StorageScreen::from_registry(&registry).unwrap();

    match screen.mount() {
        Err(StorageError::Io { reason }) => assert_eq!(reason, "Permission denied"),
        other => panic!("unexpected mount result: {:?}", other),
    }
    assert_eq!(screen.value(), None);
    assert_eq!(screen.display_text(), "Current stored value is: No Value");
}
