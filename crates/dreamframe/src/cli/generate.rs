//! The `dreamframe generate` command: one request, JSON on stdout.

use clap::Args;
use dreamframe_core::{Config, DreamError, Generator};
use serde_json::{Map, Value};

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Dream description (5-2000 characters)
    pub prompt: String,

    /// Number of panels (1-4, default 4)
    #[arg(short = 'n', long)]
    pub count: Option<i64>,

    /// Image size: 1024x1024, 512x512 or 256x256
    #[arg(short, long)]
    pub size: Option<String>,

    /// Visual style: realistic, comic or ghibli
    #[arg(long)]
    pub style: Option<String>,

    /// Provider: openai or pollinations
    #[arg(long)]
    pub provider: Option<String>,

    /// Model: flux, gpt-image-1 or dall-e-3
    #[arg(long)]
    pub model: Option<String>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

impl GenerateArgs {
    /// Build the same JSON body the HTTP API accepts, leaving unset
    /// options out so defaults apply.
    fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("prompt".into(), Value::String(self.prompt.clone()));
        if let Some(count) = self.count {
            body.insert("count".into(), Value::from(count));
        }
        let optional = [
            ("size", &self.size),
            ("style", &self.style),
            ("provider", &self.provider),
            ("model", &self.model),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                body.insert(key.into(), Value::String(value.clone()));
            }
        }
        Value::Object(body)
    }
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, config: Config) -> anyhow::Result<()> {
    let generator = Generator::from_config(&config);

    let response = match generator.generate_from_json(&args.to_body()).await {
        Ok(response) => response,
        Err(DreamError::Validation(e)) => anyhow::bail!("Invalid request: {e}"),
        Err(e) => return Err(e.into()),
    };

    let json = if args.compact {
        serde_json::to_string(&response)?
    } else {
        serde_json::to_string_pretty(&response)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(prompt: &str) -> GenerateArgs {
        GenerateArgs {
            prompt: prompt.to_string(),
            count: None,
            size: None,
            style: None,
            provider: None,
            model: None,
            compact: false,
        }
    }

    #[test]
    fn test_body_omits_unset_options() {
        assert_eq!(args("a dream").to_body(), json!({ "prompt": "a dream" }));
    }

    #[test]
    fn test_body_includes_set_options() {
        let mut a = args("a dream");
        a.count = Some(2);
        a.style = Some("comic".to_string());
        a.size = Some("512x512".to_string());
        assert_eq!(
            a.to_body(),
            json!({ "prompt": "a dream", "count": 2, "style": "comic", "size": "512x512" })
        );
    }

    #[tokio::test]
    async fn test_execute_rejects_invalid_request() {
        let mut config = Config::default();
        config.providers.openai.api_key = String::new();
        let mut a = args("hey");
        a.count = Some(9);
        let err = execute(a, config).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("prompt"));
        assert!(message.contains("count"));
    }
}
