//! Database connection arguments shared by `serve` and `migrate`

use std::time::Duration;

use books_server::{DatabaseConfig, RetryPolicy};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Full connection URL; overrides the individual --db-* options
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = books_server::config::DEFAULT_DB_PORT)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database name
    #[arg(long, env = "DB_NAME")]
    pub db_name: Option<String>,

    /// Maximum pooled connections
    #[arg(long, default_value_t = books_server::db::pool::DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Connection attempts at startup before giving up
    #[arg(long, default_value_t = 30)]
    pub connect_attempts: u32,

    /// Seconds to wait between connection attempts
    #[arg(long, default_value_t = 2)]
    pub connect_interval_secs: u64,
}

impl DatabaseArgs {
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            name: self.db_name.clone(),
            max_connections: self.max_connections,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.connect_attempts,
            interval: Duration::from_secs(self.connect_interval_secs),
        }
    }
}
