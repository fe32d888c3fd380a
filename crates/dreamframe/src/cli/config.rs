//! The `dreamframe config` command for configuration management.

use clap::{Args, Subcommand};
use dreamframe_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration (literal API keys are redacted)
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs, config: Config) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let credential = if config.primary_api_key().is_some() {
                "set"
            } else {
                "not set (free provider only)"
            };
            let toml = redacted(config).to_toml()?;
            println!("{}", toml);
            println!("# paid provider credential: {credential}");
        }

        ConfigCommand::Path => {
            let path = Config::default_path();
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = Config::default().to_toml()?;
            std::fs::write(&path, toml)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Replace a literal API key with a placeholder; `${ENV}` references are kept.
fn redacted(mut config: Config) -> Config {
    let key = &config.providers.openai.api_key;
    let is_reference = key.starts_with("${") && key.ends_with('}');
    if !key.is_empty() && !is_reference {
        config.providers.openai.api_key = "<redacted>".to_string();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_key_redacted() {
        let mut config = Config::default();
        config.providers.openai.api_key = "sk-live-secret".to_string();
        let toml = redacted(config).to_toml().unwrap();
        assert!(!toml.contains("sk-live-secret"));
        assert!(toml.contains("<redacted>"));
    }

    #[test]
    fn test_env_reference_kept() {
        let toml = redacted(Config::default()).to_toml().unwrap();
        assert!(toml.contains("${OPENAI_API_KEY}"));
    }
}
