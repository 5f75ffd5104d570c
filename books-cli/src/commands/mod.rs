//! Command implementations for books-api

pub mod database;
pub mod migrate;
pub mod serve;

pub use database::DatabaseArgs;
pub use migrate::run_migrate;
pub use serve::run_serve;
