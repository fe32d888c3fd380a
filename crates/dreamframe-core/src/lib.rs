//! Dreamframe Core - dream descriptions in, sequential image panels out.
//!
//! A request describing a dream is validated, split into one text fragment
//! per panel, decorated with continuity and style instructions, and sent to
//! an image provider. The paid provider falls back to a free one when it
//! fails or has no credential.
//!
//! # Architecture
//!
//! ```text
//! JSON → Validate → Divide → Compose → Dispatch (OpenAI | Pollinations) → images
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use dreamframe_core::{Config, GenerationRequest, Generator};
//!
//! #[tokio::main]
//! async fn main() -> dreamframe_core::Result<()> {
//!     let config = Config::load()?;
//!     let generator = Generator::from_config(&config);
//!
//!     let request = GenerationRequest::new("I was flying. Then the city melted.");
//!     let response = generator.generate(&request).await?;
//!     for image in response.images {
//!         println!("{}", image.url);
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod dispatch;
pub mod error;
pub mod generator;
pub mod panels;
pub mod provider;
pub mod request;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use dispatch::{DispatchOptions, Dispatcher, Strategy};
pub use error::{
    ConfigError, DreamError, FlattenedErrors, ProviderError, Result, ServiceError,
    ValidationError,
};
pub use generator::Generator;
pub use provider::{ImageProvider, ImageRequest};
pub use types::{
    GeneratedImage, GenerationRequest, GenerationResponse, ImageModel, ImageSize, PanelPrompt,
    Provider, Style,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
