//! Provider dispatch with a single fallback transition.
//!
//! The strategy is resolved once per request from the requested provider
//! and the paid provider's availability. The paid strategy fans out one call
//! per panel and joins them all-or-nothing; any failure discards every
//! result and the whole request is rebuilt once on the free provider.

use crate::config::Config;
use crate::error::{ProviderError, ServiceError};
use crate::provider::{ImageProvider, ImageRequest, PollinationsProvider, ProviderFactory};
use crate::types::{GeneratedImage, GenerationRequest, ImageSize, PanelPrompt, Provider};
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Which backend serves a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Paid provider, falling back to the free one on failure
    Primary,
    /// Free provider only
    Fallback,
}

/// Pick the strategy for a request.
///
/// The paid strategy is only possible when its credential is present.
pub fn resolve_strategy(requested: Provider, primary_available: bool) -> Strategy {
    match requested {
        Provider::Openai if primary_available => Strategy::Primary,
        _ => Strategy::Fallback,
    }
}

/// Dispatch behavior knobs.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Allow switching to the free provider when the paid one is unusable
    pub fallback_enabled: bool,
    /// Paid model used when the request names the free-path model
    pub primary_default_model: String,
    /// Credential name reported when the paid provider is required but missing
    pub credential_name: String,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            fallback_enabled: true,
            primary_default_model: "gpt-image-1".to_string(),
            credential_name: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl DispatchOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            fallback_enabled: config.dispatch.fallback_enabled,
            primary_default_model: config.providers.openai.default_model.clone(),
            credential_name: config.primary_credential_name(),
        }
    }
}

/// Sends composed panel prompts to a backend and collects image references.
pub struct Dispatcher {
    primary: Option<Arc<dyn ImageProvider>>,
    free: PollinationsProvider,
    options: DispatchOptions,
}

impl Dispatcher {
    /// Create a dispatcher.
    ///
    /// `primary` is the capability flag: `None` means no credential, and
    /// every request is served by the free provider.
    pub fn new(
        primary: Option<Arc<dyn ImageProvider>>,
        free: PollinationsProvider,
        options: DispatchOptions,
    ) -> Self {
        Self {
            primary,
            free,
            options,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ProviderFactory::primary(config),
            ProviderFactory::free(config),
            DispatchOptions::from_config(config),
        )
    }

    /// Whether the paid provider can be used at all.
    pub fn primary_available(&self) -> bool {
        self.primary.as_ref().is_some_and(|p| p.is_available())
    }

    /// Generate one image per panel.
    pub async fn dispatch(
        &self,
        panels: &[PanelPrompt],
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedImage>, ServiceError> {
        let primary = match (
            resolve_strategy(request.provider, self.primary_available()),
            self.primary.as_ref(),
        ) {
            (Strategy::Primary, Some(primary)) => primary,
            _ => return self.dispatch_free_only(panels, request),
        };

        let primary_err = match self.run_primary(primary.as_ref(), panels, request).await {
            Ok(images) => return Ok(images),
            Err(e) => e,
        };

        if !self.options.fallback_enabled {
            tracing::error!("{} generation failed, fallback disabled: {primary_err}", primary.name());
            return Err(primary_err.into());
        }

        tracing::warn!(
            "{} generation failed, retrying all {} panels on {}: {primary_err}",
            primary.name(),
            panels.len(),
            self.free.name()
        );
        self.run_fallback(panels, request.size).map_err(|fallback_err| {
            tracing::error!("{} fallback failed: {fallback_err}", self.free.name());
            ServiceError::from(primary_err)
        })
    }

    fn dispatch_free_only(
        &self,
        panels: &[PanelPrompt],
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedImage>, ServiceError> {
        if request.provider == Provider::Openai {
            if !self.options.fallback_enabled {
                return Err(ServiceError::MissingCredential(
                    self.options.credential_name.clone(),
                ));
            }
            tracing::info!(
                "{} not set, serving openai request with {}",
                self.options.credential_name,
                self.free.name()
            );
        }
        Ok(self.run_fallback(panels, request.size)?)
    }

    /// Fan out one paid call per panel and join them all-or-nothing.
    ///
    /// Every call is awaited before deciding; the first error (in panel
    /// order) is returned and all successes are discarded.
    async fn run_primary(
        &self,
        provider: &dyn ImageProvider,
        panels: &[PanelPrompt],
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedImage>, ProviderError> {
        let model = if request.model.is_primary_model() {
            request.model.as_str().to_string()
        } else {
            self.options.primary_default_model.clone()
        };

        let requests: Vec<ImageRequest> = panels
            .iter()
            .map(|panel| ImageRequest {
                prompt: panel.text.clone(),
                model: model.clone(),
                size: request.size,
            })
            .collect();

        tracing::debug!(
            "Dispatching {} panels to {} ({model}, {})",
            requests.len(),
            provider.name(),
            request.size
        );

        let results = join_all(requests.iter().map(|r| provider.generate(r))).await;

        let mut images = Vec::with_capacity(results.len());
        let mut first_error = None;
        for (i, result) in results.into_iter().enumerate() {
            match result {
                Ok(image) => images.push(image),
                Err(e) => {
                    tracing::debug!("Panel {} of {} failed: {e}", i + 1, panels.len());
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(images),
        }
    }

    fn run_fallback(
        &self,
        panels: &[PanelPrompt],
        size: ImageSize,
    ) -> Result<Vec<GeneratedImage>, ProviderError> {
        self.free.render(panels, size, now_millis())
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
