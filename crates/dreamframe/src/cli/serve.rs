//! The `dreamframe serve` command.

use crate::server::{self, AppState};
use clap::Args;
use dreamframe_core::{Config, Generator};
use std::net::SocketAddr;
use std::sync::Arc;

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,
}

impl ServeArgs {
    fn bind_addr(&self, config: &Config) -> anyhow::Result<SocketAddr> {
        let host = self.host.as_deref().unwrap_or(&config.server.host);
        let port = self.port.unwrap_or(config.server.port);
        format!("{host}:{port}")
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address {host}:{port}: {e}"))
    }
}

/// Execute the serve command.
pub async fn execute(args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let addr = args.bind_addr(&config)?;
    let generator = Generator::from_config(&config);

    if generator.primary_available() {
        tracing::info!("Paid provider configured, free provider used as fallback");
    } else {
        tracing::warn!("No paid provider credential, serving from the free provider only");
    }

    let state = AppState {
        generator: Arc::new(generator),
    };
    server::serve(state, addr).await
}
