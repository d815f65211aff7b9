//! HTTP server command
//!
//! Resolves configuration (defaults < config file < environment < flags)
//! and runs the item service until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use itemctl_server::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// TOML config file (missing keys use defaults)
    #[arg(long, short = 'c', env = "ITEMCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind to (default: 127.0.0.1:8000)
    #[arg(long, short = 'b', env = "ITEMCTL_BIND")]
    pub bind: Option<SocketAddr>,

    /// Database URL (default: sqlite://test.db)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    /// Merge the config file and overrides into a server configuration.
    pub fn resolve(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        if let Some(max) = self.max_connections {
            config.database.max_connections = max;
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        if self.cors_permissive {
            config.cors_permissive = true;
        }

        Ok(config)
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.resolve()?;

    tracing::info!(
        bind = %config.bind_addr,
        database = %config.database.url,
        "Starting itemctl server"
    );

    // Blocks until shutdown; the engine is disposed before this returns
    run_server(config).await.context("Server error")?;

    Ok(())
}
