//! books-api - book catalogue HTTP service
//!
//! Entry point for:
//! - `serve`: connect to PostgreSQL (with startup retry), create the schema,
//!   serve `/books` and `/health`
//! - `migrate`: create the schema and exit
//!
//! Settings come from flags, the environment, or a `.env` file.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "books-api",
    author,
    version,
    about = "Book catalogue HTTP service backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// OTLP collector endpoint for trace export (e.g. http://localhost:4317)
    #[arg(long, global = true, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    otel_endpoint: Option<String>,

    /// Disable trace export even when an endpoint is configured
    #[arg(long, global = true)]
    no_otel: bool,

    /// service.name reported with exported spans
    #[arg(
        long,
        global = true,
        env = "OTEL_SERVICE_NAME",
        default_value = tracing_setup::DEFAULT_SERVICE_NAME
    )]
    service_name: String,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn tracing_config(&self) -> TracingConfig {
        TracingConfig {
            debug: self.debug,
            otel_endpoint: if self.no_otel {
                None
            } else {
                self.otel_endpoint.clone().filter(|e| !e.is_empty())
            },
            service_name: self.service_name.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database schema and exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so clap's env fallbacks see it
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&cli.tracing_config())?;

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
