//! Error types for books-server bootstrap

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("could not connect to database after {attempts} attempts: {source}")]
    ConnectExhausted {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
