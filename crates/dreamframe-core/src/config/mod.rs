//! Configuration management for Dreamframe.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Every section implements `Default`, so a missing file or a
//! partial file is always usable.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Dreamframe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Dispatch and fallback behavior
    pub dispatch: DispatchConfig,

    /// Image provider settings
    pub providers: ProvidersConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.dreamframe.dreamframe/config.toml
    /// - Linux: ~/.config/dreamframe/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\dreamframe\config\config.toml
    ///
    /// Falls back to ~/.dreamframe/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "dreamframe", "dreamframe")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".dreamframe").join("config.toml")
            })
    }

    /// The paid provider's API key, if one is configured.
    ///
    /// Its presence is the capability flag that enables the paid strategy.
    pub fn primary_api_key(&self) -> Option<String> {
        resolve_env_var(&self.providers.openai.api_key)
    }

    /// Name of the credential to report when the paid provider is missing.
    pub fn primary_credential_name(&self) -> String {
        let key = &self.providers.openai.api_key;
        if key.starts_with("${") && key.ends_with('}') {
            key[2..key.len() - 1].to_string()
        } else {
            "OPENAI_API_KEY".to_string()
        }
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
///
/// Plain strings pass through; empty strings and unset or empty variables
/// resolve to `None`.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
