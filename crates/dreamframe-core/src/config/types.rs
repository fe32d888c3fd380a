//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Provider dispatch behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Retry a failed (or unavailable) paid generation on the free provider.
    ///
    /// When disabled, a request that explicitly asks for the paid provider
    /// fails instead of silently switching backends.
    pub fallback_enabled: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            fallback_enabled: true,
        }
    }
}

/// Image provider configurations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Paid OpenAI Images API
    pub openai: OpenAiConfig,

    /// Free Pollinations URL service
    pub pollinations: PollinationsConfig,
}

/// OpenAI Images API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Image generation endpoint
    pub endpoint: String,

    /// Model used when the request names the free-path model
    pub default_model: String,

    /// Per-call timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: "${OPENAI_API_KEY}".to_string(),
            endpoint: "https://api.openai.com/v1/images/generations".to_string(),
            default_model: "gpt-image-1".to_string(),
            timeout_ms: 60_000,
        }
    }
}

/// Pollinations configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollinationsConfig {
    /// Base URL; images live under `{base_url}/prompt/...`
    pub base_url: String,
}

impl Default for PollinationsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://image.pollinations.ai".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
