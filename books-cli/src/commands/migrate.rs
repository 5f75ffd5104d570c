//! Schema creation command

use anyhow::{Context, Result};
use clap::Parser;

use super::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Create the books table if absent, then exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database = args.db.database_config();
    tracing::info!(database = %database, "Creating schema");

    books_server::migrate(&database, &args.db.retry_policy())
        .await
        .context("Migration failed")?;

    tracing::info!("Schema ready");
    Ok(())
}
