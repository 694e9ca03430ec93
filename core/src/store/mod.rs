// Store module — platform key/value persistence behind a small trait

pub mod backend;

pub use backend::{MemoryPreferences, PreferencesStore, SledPreferences};
