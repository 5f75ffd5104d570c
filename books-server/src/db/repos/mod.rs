//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One statement per operation, no transactions
//! - Zero rows on a keyed lookup is `DbError::NotFound`, not an empty success
//! - Generated keys come back via RETURNING (no insert-then-select)

pub mod books;
pub mod memory;

pub use books::{BookRepository, DbError, PgBookRepo};
pub use memory::MemoryBookRepo;
