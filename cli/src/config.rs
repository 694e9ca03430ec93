// Configuration management for the NativeStore CLI
//
// Cross-platform config stored in:
// - macOS: ~/Library/Application Support/nativestore/config.json
// - Linux: ~/.config/nativestore/config.json
// - Windows: %APPDATA%\nativestore\config.json

use anyhow::{Context, Result};
use nativestore_core::config::is_valid_preferences_name;
use nativestore_core::{BridgeConfig, FailurePolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "nativestore";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the preferences file (None = platform data dir)
    pub storage_path: Option<String>,

    /// Storage bridge settings
    pub bridge: BridgeConfig,

    /// Default log filter when RUST_LOG is not set
    pub log_level: String,

    /// Also write logs to a daily rolling file in the data directory
    pub log_to_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: None,
            bridge: BridgeConfig::default(),
            log_level: "warn".to_string(),
            log_to_file: false,
        }
    }
}

impl Config {
    /// Get the config directory path (cross-platform)
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR);

        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        Ok(config_dir)
    }

    /// Get the data directory path (cross-platform)
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .context("Failed to determine data directory")?
            .join(APP_DIR);

        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        Ok(data_dir)
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Directory the preferences file lives in
    pub fn storage_dir(&self) -> Result<PathBuf> {
        match &self.storage_path {
            Some(path) => {
                let dir = PathBuf::from(path);
                std::fs::create_dir_all(&dir).with_context(|| {
                    format!("Failed to create storage directory {}", dir.display())
                })?;
                Ok(dir)
            }
            None => Ok(Self::data_dir()?.join("storage")),
        }
    }

    /// Load config from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
            let config: Config =
                serde_json::from_str(&contents).context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents).context("Failed to write config file")?;
        Ok(())
    }

    /// Set a config value (in memory; call `save` to persist)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "storage_path" => {
                self.storage_path = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "preferences_name" => {
                if !is_valid_preferences_name(value) {
                    anyhow::bail!("Invalid preferences name: {:?}", value);
                }
                self.bridge.preferences_name = value.to_string();
            }
            "failure_policy" => {
                self.bridge.failure_policy = value
                    .parse::<FailurePolicy>()
                    .map_err(anyhow::Error::msg)?;
            }
            "log_level" => {
                tracing_subscriber::EnvFilter::try_new(value)
                    .with_context(|| format!("Invalid log filter: {}", value))?;
                self.log_level = value.to_string();
            }
            "log_to_file" => {
                self.log_to_file = value.parse().context("Invalid boolean value")?;
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Get a config value
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storage_path" => self.storage_path.clone(),
            "preferences_name" => Some(self.bridge.preferences_name.clone()),
            "failure_policy" => Some(self.bridge.failure_policy.to_string()),
            "log_level" => Some(self.log_level.clone()),
            "log_to_file" => Some(self.log_to_file.to_string()),
            _ => None,
        }
    }

    /// List all config values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            (
                "storage_path".to_string(),
                self.storage_path
                    .clone()
                    .unwrap_or_else(|| "(auto)".to_string()),
            ),
            (
                "preferences_name".to_string(),
                self.bridge.preferences_name.clone(),
            ),
            (
                "failure_policy".to_string(),
                self.bridge.failure_policy.to_string(),
            ),
            ("log_level".to_string(), self.log_level.clone()),
            ("log_to_file".to_string(), self.log_to_file.to_string()),
        ]
    }
}
