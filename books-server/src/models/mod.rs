//! Domain models
//!
//! Nothing here validates input: a missing title decodes as an empty string
//! and is stored as-is.

pub mod book;

pub use book::{Book, NewBook};
