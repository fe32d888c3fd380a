//! Core data types for the Dreamframe generation pipeline.
//!
//! A request is validated into a [`GenerationRequest`], expanded into one
//! [`PanelPrompt`] per image, and answered with a [`GenerationResponse`].
//! Nothing here outlives a single request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Image-generation backend requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Paid, credentialed OpenAI Images API
    Openai,
    /// Free, credential-free Pollinations URL service
    #[default]
    Pollinations,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Openai, Provider::Pollinations];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Openai => "openai",
            Provider::Pollinations => "pollinations",
        }
    }
}

/// Image model identifier.
///
/// `flux` is the only model on the free path; the two OpenAI models are
/// forwarded to the paid provider as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageModel {
    #[default]
    #[serde(rename = "flux")]
    Flux,
    #[serde(rename = "gpt-image-1")]
    GptImage1,
    #[serde(rename = "dall-e-3")]
    DallE3,
}

impl ImageModel {
    pub const ALL: [ImageModel; 3] = [ImageModel::Flux, ImageModel::GptImage1, ImageModel::DallE3];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageModel::Flux => "flux",
            ImageModel::GptImage1 => "gpt-image-1",
            ImageModel::DallE3 => "dall-e-3",
        }
    }

    /// Whether the paid provider understands this model.
    pub fn is_primary_model(&self) -> bool {
        !matches!(self, ImageModel::Flux)
    }
}

/// Output image size, one of a fixed set of square dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1024x1024")]
    Square1024,
    #[serde(rename = "512x512")]
    Square512,
    #[serde(rename = "256x256")]
    Square256,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [
        ImageSize::Square1024,
        ImageSize::Square512,
        ImageSize::Square256,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square1024 => "1024x1024",
            ImageSize::Square512 => "512x512",
            ImageSize::Square256 => "256x256",
        }
    }
}

/// Visual aesthetic applied to every panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Realistic,
    Comic,
    Ghibli,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Realistic, Style::Comic, Style::Ghibli];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Realistic => "realistic",
            Style::Comic => "comic",
            Style::Ghibli => "ghibli",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Provider, ImageModel, ImageSize, Style);

/// A validated, normalized generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Dream description, trimmed
    pub prompt: String,
    /// Number of panels to generate (1..=4)
    pub count: usize,
    pub provider: Provider,
    pub model: ImageModel,
    pub size: ImageSize,
    pub style: Style,
}

impl GenerationRequest {
    /// Default number of panels when the caller does not ask for one.
    pub const DEFAULT_COUNT: usize = 4;

    /// Build a request with every optional field at its default.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            count: Self::DEFAULT_COUNT,
            provider: Provider::default(),
            model: ImageModel::default(),
            size: ImageSize::default(),
            style: Style::default(),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// A fully composed prompt for one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelPrompt {
    /// Complete text sent to the provider
    pub text: String,
    /// Zero-based position in the sequence
    pub index: usize,
    /// Total number of panels in the request
    pub total: usize,
}

/// A reference to one generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Where the image can be fetched (https or data URL)
    pub url: String,

    /// Uniqueness token used to produce the image, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

/// Successful answer to a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub images: Vec<GeneratedImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req = GenerationRequest::new("a quiet dream");
        assert_eq!(req.count, 4);
        assert_eq!(req.provider, Provider::Pollinations);
        assert_eq!(req.model, ImageModel::Flux);
        assert_eq!(req.size, ImageSize::Square1024);
        assert_eq!(req.style, Style::Realistic);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&ImageSize::Square512).unwrap(), "\"512x512\"");
        assert_eq!(serde_json::to_string(&ImageModel::DallE3).unwrap(), "\"dall-e-3\"");
        assert_eq!(serde_json::to_string(&Style::Ghibli).unwrap(), "\"ghibli\"");
        assert_eq!(Provider::Openai.to_string(), "openai");
    }

    #[test]
    fn test_image_without_seed_omits_field() {
        let image = GeneratedImage {
            url: "https://example.com/a.png".to_string(),
            seed: None,
        };
        let json = serde_json::to_value(&image).unwrap();
        assert!(json.get("seed").is_none());
    }

    #[test]
    fn test_flux_is_not_a_primary_model() {
        assert!(!ImageModel::Flux.is_primary_model());
        assert!(ImageModel::GptImage1.is_primary_model());
    }
}
