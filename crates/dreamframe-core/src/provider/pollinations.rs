//! Pollinations free image provider.
//!
//! No API call is made: the templated URL is itself the image reference,
//! rendered later by whoever fetches it. Every panel gets a distinct seed
//! so panels built in the same millisecond never collide.

use crate::error::ProviderError;
use crate::types::{GeneratedImage, ImageSize, PanelPrompt};
use url::{form_urlencoded, Url};

const PROVIDER: &str = "pollinations";

/// The single model used on the free path.
pub const FREE_MODEL: &str = "flux";

/// Free, credential-free provider that constructs image URLs.
#[derive(Debug, Clone)]
pub struct PollinationsProvider {
    base_url: String,
}

impl PollinationsProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        PROVIDER
    }

    /// Build the image URL for one prompt.
    ///
    /// Format: `{base}/prompt/{encoded prompt}?width=W&height=H&seed=S&model=flux`.
    pub fn build_url(
        &self,
        prompt: &str,
        size: ImageSize,
        seed: &str,
    ) -> Result<String, ProviderError> {
        let (width, height) =
            parse_dimensions(size.as_str()).ok_or_else(|| ProviderError::InvalidUrl {
                provider: PROVIDER,
                message: format!("unrecognized size '{size}'"),
            })?;

        let mut url = Url::parse(&self.base_url).map_err(|e| ProviderError::InvalidUrl {
            provider: PROVIDER,
            message: format!("{}: {e}", self.base_url),
        })?;
        if url.cannot_be_a_base() {
            return Err(ProviderError::InvalidUrl {
                provider: PROVIDER,
                message: format!("{} cannot carry a path", self.base_url),
            });
        }

        // Form encoding turns spaces into '+'; a literal '+' is already %2B,
        // so every remaining '+' is a space.
        let encoded_prompt = form_urlencoded::byte_serialize(prompt.as_bytes())
            .collect::<String>()
            .replace('+', "%20");

        // `set_path` keeps existing escapes, so the prompt is not encoded twice.
        let path = format!(
            "{}/prompt/{}",
            url.path().trim_end_matches('/'),
            encoded_prompt
        );
        url.set_path(&path);
        url.set_fragment(None);
        url.query_pairs_mut()
            .append_pair("width", &width.to_string())
            .append_pair("height", &height.to_string())
            .append_pair("seed", seed)
            .append_pair("model", FREE_MODEL);

        Ok(url.into())
    }

    /// Build one image reference per panel.
    ///
    /// Seeds are `base_seed + panel index`, so they are distinct within a
    /// request. The seed is returned alongside the URL.
    pub fn render(
        &self,
        panels: &[PanelPrompt],
        size: ImageSize,
        base_seed: u64,
    ) -> Result<Vec<GeneratedImage>, ProviderError> {
        panels
            .iter()
            .map(|panel| {
                let seed = base_seed.wrapping_add(panel.index as u64).to_string();
                let url = self.build_url(&panel.text, size, &seed)?;
                Ok(GeneratedImage {
                    url,
                    seed: Some(seed),
                })
            })
            .collect()
    }
}

/// Split a `WxH` size string into integer width and height.
pub fn parse_dimensions(size: &str) -> Option<(u32, u32)> {
    let (w, h) = size.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}
