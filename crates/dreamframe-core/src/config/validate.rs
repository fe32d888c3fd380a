//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".into(),
            ));
        }
        if self.providers.openai.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "providers.openai.timeout_ms must be > 0".into(),
            ));
        }
        check_http_url("providers.openai.endpoint", &self.providers.openai.endpoint)?;
        check_http_url(
            "providers.pollinations.base_url",
            &self.providers.pollinations.base_url,
        )?;
        if !matches!(
            self.providers.openai.default_model.as_str(),
            "gpt-image-1" | "dall-e-3"
        ) {
            return Err(ConfigError::ValidationError(format!(
                "providers.openai.default_model must be 'gpt-image-1' or 'dall-e-3', got '{}'",
                self.providers.openai.default_model
            )));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(
                "logging.format must be 'pretty' or 'json'".into(),
            ));
        }
        Ok(())
    }
}

fn check_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| ConfigError::ValidationError(format!("{key} is not a valid URL: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
        return Err(ConfigError::ValidationError(format!(
            "{key} must be an http(s) URL"
        )));
    }
    Ok(())
}
