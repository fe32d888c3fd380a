//! Error types for the Dreamframe generation pipeline.
//!
//! Errors follow the request lifecycle: validation failures are reported to
//! the caller and never reach a provider, provider failures are absorbed by
//! the dispatcher's single fallback attempt, and only service errors escape
//! to the caller as an unrecoverable failure.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Top-level error type for Dreamframe operations.
#[derive(Error, Debug)]
pub enum DreamError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The inbound request failed validation
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Generation could not be completed by any provider
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// A single violated constraint on one request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field as it appears in the request body
    pub field: &'static str,
    /// Human-readable description of the violation
    pub message: String,
}

/// Every constraint the request violated, collected in one pass.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{}", summarize(.form_errors, .field_errors))]
pub struct ValidationError {
    /// Problems with the body as a whole (e.g. not a JSON object)
    pub form_errors: Vec<String>,
    /// Per-field problems, in field order
    pub field_errors: Vec<FieldError>,
}

fn summarize(form_errors: &[String], field_errors: &[FieldError]) -> String {
    let mut parts: Vec<String> = form_errors.to_vec();
    parts.extend(
        field_errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message)),
    );
    parts.join("; ")
}

/// Wire shape of a validation failure: form-level messages plus
/// messages grouped by field name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    /// A body that is not JSON at all, reported as a single form error.
    pub fn invalid_json(err: &serde_json::Error) -> Self {
        let mut errors = Self::default();
        errors.form(format!("Invalid JSON: {err}"));
        errors
    }

    pub(crate) fn form(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    pub(crate) fn field(&mut self, field: &'static str, message: impl Into<String>) {
        self.field_errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// True when no constraint was violated.
    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// Whether any violation was recorded against `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.field_errors.iter().any(|e| e.field == field)
    }

    /// Group field messages by field name for the HTTP error body.
    pub fn flatten(&self) -> FlattenedErrors {
        let mut field_errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for e in &self.field_errors {
            field_errors
                .entry(e.field.to_string())
                .or_default()
                .push(e.message.clone());
        }
        FlattenedErrors {
            form_errors: self.form_errors.clone(),
            field_errors,
        }
    }
}

/// Failure of a single image-generation backend.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The request never produced an HTTP response (DNS, connect, timeout)
    #[error("{provider} request failed: {message}")]
    Request {
        provider: &'static str,
        message: String,
    },

    /// The backend answered with a non-success status
    #[error("{provider} HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded
    #[error("Failed to parse {provider} response: {message}")]
    Malformed {
        provider: &'static str,
        message: String,
    },

    /// The response decoded but carried no image reference
    #[error("{provider} returned no image data")]
    MissingImage { provider: &'static str },

    /// An image URL could not be constructed
    #[error("Invalid {provider} URL: {message}")]
    InvalidUrl {
        provider: &'static str,
        message: String,
    },
}

/// Unrecoverable generation failure surfaced to the caller.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The paid provider was required but no credential is configured
    #[error("Missing {0}")]
    MissingCredential(String),

    /// Every permitted strategy failed; carries the originating error
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

/// Convenience type alias for Dreamframe results.
pub type Result<T> = std::result::Result<T, DreamError>;
