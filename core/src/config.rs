// Bridge configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

/// Preferences file name used when the host does not pick one.
pub const DEFAULT_PREFERENCES_NAME: &str = "my_prefs";

/// What the bridge does when the underlying store fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Return the error to the caller.
    #[default]
    Propagate,
    /// Log and carry on: writes report success, reads return "".
    Ignore,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Propagate => write!(f, "propagate"),
            FailurePolicy::Ignore => write!(f, "ignore"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "propagate" => Ok(FailurePolicy::Propagate),
            "ignore" => Ok(FailurePolicy::Ignore),
            other => Err(format!(
                "Invalid failure policy '{}' (expected 'propagate' or 'ignore')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Name of the preferences file keys are grouped under
    pub preferences_name: String,

    /// Behavior on persistence failure
    pub failure_policy: FailurePolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            preferences_name: DEFAULT_PREFERENCES_NAME.to_string(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// A preferences name must be a single plain path component, so the file
/// always lands directly inside the storage directory.
pub fn is_valid_preferences_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}
