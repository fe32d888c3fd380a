//! OpenAI image provider using the Images API.
//!
//! Requests one image per call. Hosted URLs are returned as-is; models that
//! answer with inline base64 are normalized to a data URL.

use super::{ImageProvider, ImageRequest};
use crate::error::ProviderError;
use crate::types::GeneratedImage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const PROVIDER: &str = "openai";

/// OpenAI provider using the Images API.
pub struct OpenAiProvider {
    api_key: String,
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, endpoint: &str, timeout: Duration) -> Self {
        Self {
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            timeout,
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ImagesRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
}

// --- Response types ---

#[derive(Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
    b64_json: Option<String>,
}

/// Pick the first usable image reference out of a response.
fn first_image(response: ImagesResponse) -> Result<GeneratedImage, ProviderError> {
    response
        .data
        .into_iter()
        .find_map(|d| match (d.url, d.b64_json) {
            (Some(url), _) if !url.is_empty() => Some(url),
            (_, Some(b64)) if !b64.is_empty() => Some(format!("data:image/png;base64,{b64}")),
            _ => None,
        })
        .map(|url| GeneratedImage { url, seed: None })
        .ok_or(ProviderError::MissingImage { provider: PROVIDER })
}

#[async_trait]
impl ImageProvider for OpenAiProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, ProviderError> {
        let start = Instant::now();

        let body = ImagesRequest {
            model: &request.model,
            prompt: &request.prompt,
            n: 1,
            size: request.size.as_str(),
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::Request {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body: text,
            });
        }

        let images: ImagesResponse = resp.json().await.map_err(|e| ProviderError::Malformed {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        let image = first_image(images)?;
        tracing::debug!(
            "OpenAI image generated with {} in {}ms",
            request.model,
            start.elapsed().as_millis()
        );
        Ok(image)
    }
}
