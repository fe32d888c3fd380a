//! Dreamframe CLI - turn a dream description into a sequence of image panels.
//!
//! Dreamframe splits a narrative prompt into panels, adds continuity and
//! style instructions to each one, and generates the images with OpenAI
//! (when a key is configured) or the free Pollinations service.
//!
//! # Usage
//!
//! ```bash
//! # Run the HTTP API
//! dreamframe serve --port 3000
//!
//! # Generate once and print the JSON response
//! dreamframe generate "I was flying. Then the city melted." -n 2 --style comic
//!
//! # View configuration
//! dreamframe config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;
mod server;

/// Dreamframe - turn a dream description into a sequence of image panels.
#[derive(Parser, Debug)]
#[command(name = "dreamframe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the generation API over HTTP
    Serve(cli::serve::ServeArgs),

    /// Generate panels for one prompt and print the result as JSON
    Generate(cli::generate::GenerateArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go to stderr directly.
    let config = match dreamframe_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `dreamframe config path`."
            );
            dreamframe_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Dreamframe v{}", dreamframe_core::VERSION);

    match cli.command {
        Commands::Serve(args) => cli::serve::execute(args, config).await,
        Commands::Generate(args) => cli::generate::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, config).await,
    }
}
