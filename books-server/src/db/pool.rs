//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. At startup the pool is
//! opened through [`establish`], a bounded retry loop with a fixed sleep
//! between attempts:
//!
//! ```text
//! Connecting(1) --fail--> Connecting(2) --fail--> ... Connecting(max) --fail--> Fatal
//!      |                       |                          |
//!      +--------ok-------------+-----------ok-------------+----------> Ready
//! ```

use std::fmt::Display;
use std::future::Future;
use std::io;
use std::time::Duration;

use sqlx::postgres::{PgConnection, PgPoolOptions};
use sqlx::{Connection, PgPool};

use crate::config::DatabaseConfig;
use crate::{Error, Result};

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Upper bound on one startup attempt (TCP connect + handshake). A refused
/// connection fails immediately; this only caps hosts that never answer.
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a request may wait for a pooled connection once serving.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Fixed-interval retry policy for the startup connection.
///
/// With the defaults an unreachable-but-refusing database is given up on
/// after roughly `29 * interval` = 58s; a host that drops packets can add up
/// to [`ATTEMPT_TIMEOUT`] per attempt on top of that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts before giving up (values below 1 are treated as 1)
    pub max_attempts: u32,
    /// Sleep between a failed attempt and the next one
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(2),
        }
    }
}

/// Every attempt failed; carries the error from the last one.
#[derive(Debug)]
pub struct Exhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

enum Phase<T, E> {
    Connecting { attempt: u32 },
    Ready(T),
    Fatal(Exhausted<E>),
}

/// Run `connect` until it succeeds or `policy.max_attempts` is reached.
///
/// `connect` receives the 1-based attempt number. Exactly `max_attempts - 1`
/// sleeps happen when every attempt fails.
pub async fn establish<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut connect: F,
) -> std::result::Result<T, Exhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut phase = Phase::Connecting { attempt: 1 };

    loop {
        phase = match phase {
            Phase::Connecting { attempt } => match connect(attempt).await {
                Ok(conn) => {
                    tracing::info!(attempt, "Connected to database");
                    Phase::Ready(conn)
                }
                Err(err) if attempt >= max_attempts => {
                    tracing::error!(attempt, error = %err, "Giving up on database connection");
                    Phase::Fatal(Exhausted {
                        attempts: attempt,
                        last_error: err,
                    })
                }
                Err(err) => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        error = %err,
                        "Failed to connect to database, retrying in {:?}",
                        policy.interval
                    );
                    tokio::time::sleep(policy.interval).await;
                    Phase::Connecting {
                        attempt: attempt + 1,
                    }
                }
            },
            Phase::Ready(conn) => return Ok(conn),
            Phase::Fatal(exhausted) => return Err(exhausted),
        };
    }
}

/// Open the pool described by `config`, retrying per `policy`.
///
/// # Errors
///
/// `Error::Database` if the configuration cannot be turned into connect
/// options, `Error::ConnectExhausted` once every attempt has failed.
pub async fn connect_with_retry(config: &DatabaseConfig, policy: &RetryPolicy) -> Result<PgPool> {
    let options = config.connect_options()?;
    let max_connections = config.max_connections;

    tracing::info!(database = %config, max_attempts = policy.max_attempts, "Connecting to database");

    establish(policy, |_attempt| {
        let options = options.clone();
        async move {
            // One plain connection, no sqlx-internal retry: each failure is
            // reported to the loop straight away.
            let conn = tokio::time::timeout(ATTEMPT_TIMEOUT, PgConnection::connect_with(&options))
                .await
                .map_err(|_| {
                    sqlx::Error::Io(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("no answer within {:?}", ATTEMPT_TIMEOUT),
                    ))
                })??;
            conn.close().await?;

            Ok::<_, sqlx::Error>(
                PgPoolOptions::new()
                    .max_connections(max_connections)
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .connect_lazy_with(options),
            )
        }
    })
    .await
    .map_err(|e| Error::ConnectExhausted {
        attempts: e.attempts,
        source: e.last_error,
    })
}

/// Create a PostgreSQL connection pool with a single attempt.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/books").await?;
/// ```
pub async fn create_pool(database_url: &str) -> std::result::Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}
