//! HTTP server command for books-api

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use books_server::ServerConfig;

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            database: self.db.database_config(),
            retry: self.db.retry_policy(),
        }
    }
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    tracing::info!(database = %config.database, "Starting books-api on {}", config.bind_addr);

    books_server::serve(config).await.context("Server error")?;

    Ok(())
}
