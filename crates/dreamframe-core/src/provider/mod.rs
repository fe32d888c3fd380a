//! Image-generation backends.
//!
//! The paid backend sits behind the [`ImageProvider`] trait so the
//! dispatcher can hold it as a trait object (and tests can swap in a mock).
//! The free backend is a concrete, synchronous URL builder: it performs no
//! I/O and needs no trait.

pub mod openai;
pub mod pollinations;

pub use openai::OpenAiProvider;
pub use pollinations::PollinationsProvider;

use crate::config::Config;
use crate::error::ProviderError;
use crate::types::{GeneratedImage, ImageSize};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// One image to generate.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    /// Fully composed panel prompt
    pub prompt: String,
    /// Provider-specific model identifier
    pub model: String,
    pub size: ImageSize,
}

/// Trait that paid image providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Arc<dyn ImageProvider>` for dynamic dispatch).
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Provider name for logging (e.g., "openai").
    fn name(&self) -> &str;

    /// Whether the provider has what it needs (credentials) to be called.
    fn is_available(&self) -> bool;

    /// Generate exactly one image for the given request.
    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, ProviderError>;
}

/// Factory that builds providers from configuration.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the paid provider, or `None` when no credential is configured.
    pub fn primary(config: &Config) -> Option<Arc<dyn ImageProvider>> {
        let cfg = &config.providers.openai;
        match config.primary_api_key() {
            Some(api_key) => {
                tracing::debug!("OpenAI provider enabled (endpoint {})", cfg.endpoint);
                Some(Arc::new(OpenAiProvider::new(
                    &api_key,
                    &cfg.endpoint,
                    Duration::from_millis(cfg.timeout_ms),
                )))
            }
            None => {
                tracing::debug!("No OpenAI credential configured, free provider only");
                None
            }
        }
    }

    /// Create the free provider.
    pub fn free(config: &Config) -> PollinationsProvider {
        PollinationsProvider::new(&config.providers.pollinations.base_url)
    }
}
