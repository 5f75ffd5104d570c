//! books-server: book catalogue HTTP service over PostgreSQL
//!
//! Layers, each depending only on the one below:
//!
//! - [`http`]: axum handlers, JSON errors, request tracing
//! - [`service`]: pass-through seam between handlers and storage
//! - [`db`]: pool with startup retry, schema, repositories
//!
//! [`serve`] wires them together.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod service;
pub mod state;

use std::sync::Arc;

pub use config::{DatabaseConfig, ServerConfig};
pub use db::RetryPolicy;
pub use error::{Error, Result};
pub use state::AppState;

use db::repos::PgBookRepo;
use service::DefaultBookService;

/// Connect (with retry), create the schema, and serve until shutdown.
///
/// # Errors
///
/// `Error::ConnectExhausted` when the database never becomes reachable;
/// the caller is expected to treat it as fatal.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let pool = db::connect_with_retry(&config.database, &config.retry).await?;

    db::migrations::run(&pool).await?;

    let repo = Arc::new(PgBookRepo::new(pool.clone()));
    let service = Arc::new(DefaultBookService::new(repo));
    let state = AppState::new(service);

    let result = http::run_server(state, config.bind_addr).await;
    pool.close().await;
    result
}

/// Connect (with retry) and create the schema, then return.
pub async fn migrate(database: &DatabaseConfig, retry: &RetryPolicy) -> Result<()> {
    let pool = db::connect_with_retry(database, retry).await?;
    db::migrations::run(&pool).await?;
    pool.close().await;
    Ok(())
}
