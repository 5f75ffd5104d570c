//! Database layer - connection pool, schema, and repositories
//!
//! # Design Principles
//!
//! - One shared `PgPool`, cloned into repositories - no Arc<Mutex<Connection>>
//! - Startup connects through a bounded retry loop, fatal on exhaustion
//! - Schema is created if absent; there is no migration versioning

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{connect_with_retry, create_pool, establish, Exhausted, RetryPolicy};
pub use repos::*;
