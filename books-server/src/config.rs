//! Server and database configuration

use std::fmt;
use std::net::SocketAddr;

use sqlx::postgres::PgConnectOptions;

use crate::db::pool::{RetryPolicy, DEFAULT_MAX_CONNECTIONS};

/// Default PostgreSQL port
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Where and how to reach PostgreSQL.
///
/// `url` wins over the individual parts when set.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: DEFAULT_DB_PORT,
            user: None,
            password: None,
            name: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Build sqlx connect options.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::Configuration` when `url` does not parse.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }

        let mut options = PgConnectOptions::new().host(&self.host).port(self.port);
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(name) = &self.name {
            options = options.database(name);
        }
        Ok(options)
    }
}

/// Connection target with the password masked, for logs.
impl fmt::Display for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.url.is_some() {
            let options = match self.connect_options() {
                Ok(options) => options,
                Err(_) => return f.write_str("<invalid DATABASE_URL>"),
            };
            return write!(
                f,
                "postgres://{}@{}:{}/{}",
                options.get_username(),
                options.get_host(),
                options.get_port(),
                options.get_database().unwrap_or_default()
            );
        }

        f.write_str("postgres://")?;
        if let Some(user) = &self.user {
            f.write_str(user)?;
            if self.password.is_some() {
                f.write_str(":***")?;
            }
            f.write_str("@")?;
        }
        write!(
            f,
            "{}:{}/{}",
            self.host,
            self.port,
            self.name.as_deref().unwrap_or_default()
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("target", &self.to_string())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,
    pub database: DatabaseConfig,
    /// Startup connection retry policy
    pub retry: RetryPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database: DatabaseConfig::default(),
            retry: RetryPolicy::default(),
        }
    }
}
