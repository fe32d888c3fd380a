//! The generation pipeline: validate, compose, dispatch.

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::{DreamError, ServiceError};
use crate::panels::panel_prompts;
use crate::request;
use crate::types::{GenerationRequest, GenerationResponse};
use serde_json::Value;

/// Turns dream descriptions into panel images.
///
/// Holds no per-request state; a single instance can serve any number of
/// concurrent requests.
pub struct Generator {
    dispatcher: Dispatcher,
}

impl Generator {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Dispatcher::from_config(config))
    }

    /// Whether the paid provider is configured.
    pub fn primary_available(&self) -> bool {
        self.dispatcher.primary_available()
    }

    /// Generate images for an already validated request.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ServiceError> {
        let panels = panel_prompts(request);
        tracing::info!(
            "Generating {} panel(s): provider={}, size={}, style={}",
            panels.len(),
            request.provider,
            request.size,
            request.style
        );

        let images = self.dispatcher.dispatch(&panels, request).await?;
        tracing::debug!("Generated {} image(s)", images.len());
        Ok(GenerationResponse { images })
    }

    /// Validate a raw JSON body, then generate.
    ///
    /// Validation failures are returned before any provider is contacted.
    pub async fn generate_from_json(&self, body: &Value) -> Result<GenerationResponse, DreamError> {
        let request = request::validate(body)?;
        Ok(self.generate(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DispatchOptions;
    use crate::error::ProviderError;
    use crate::provider::{ImageProvider, ImageRequest, PollinationsProvider};
    use crate::types::GeneratedImage;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct CountingProvider {
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl ImageProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn generate(&self, _request: &ImageRequest) -> Result<GeneratedImage, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GeneratedImage {
                url: "https://images.example/1.png".to_string(),
                seed: None,
            })
        }
    }

    fn with_counting_primary() -> (Generator, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let primary: Arc<dyn ImageProvider> = Arc::new(CountingProvider {
            calls: Arc::clone(&calls),
        });
        let dispatcher = Dispatcher::new(
            Some(primary),
            PollinationsProvider::new("https://image.pollinations.ai"),
            DispatchOptions::default(),
        );
        (Generator::new(dispatcher), calls)
    }

    fn free_only() -> Generator {
        let mut config = Config::default();
        config.providers.openai.api_key = String::new();
        Generator::from_config(&config)
    }

    #[tokio::test]
    async fn test_generate_returns_count_images() {
        let generator = free_only();
        for count in 1..=4 {
            let request = GenerationRequest::new("I was a whale. The sky was water.")
                .with_count(count);
            let response = generator.generate(&request).await.unwrap();
            assert_eq!(response.images.len(), count);
        }
    }

    #[tokio::test]
    async fn test_generate_from_json_validates_first() {
        let generator = free_only();
        let err = generator
            .generate_from_json(&json!({ "prompt": "hey", "count": 7 }))
            .await
            .unwrap_err();
        match err {
            DreamError::Validation(v) => {
                assert!(v.has_field("prompt"));
                assert!(v.has_field("count"));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_body_never_reaches_provider() {
        let (generator, calls) = with_counting_primary();

        let bodies = [
            json!({ "prompt": "hey", "provider": "openai" }),
            json!({ "prompt": "A valid dream prompt", "provider": "openai", "count": 0 }),
            json!({ "prompt": "A valid dream prompt", "provider": "openai", "size": "2x2" }),
            json!(null),
        ];
        for body in &bodies {
            let err = generator.generate_from_json(body).await.unwrap_err();
            assert!(matches!(err, DreamError::Validation(_)));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let valid = json!({ "prompt": "A valid dream prompt", "provider": "openai", "count": 2 });
        let response = generator.generate_from_json(&valid).await.unwrap();
        assert_eq!(response.images.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_generate_from_json_applies_style() {
        let generator = free_only();
        let response = generator
            .generate_from_json(&json!({
                "prompt": "A train made of paper.",
                "count": 1,
                "style": "ghibli",
                "size": "256x256"
            }))
            .await
            .unwrap();
        let url = &response.images[0].url;
        assert!(url.contains("Studio%20Ghibli"));
        assert!(url.contains("width=256&height=256"));
    }

    #[test]
    fn test_primary_unavailable_without_key() {
        assert!(!free_only().primary_available());
    }
}
