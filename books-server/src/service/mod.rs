//! Service layer between HTTP handlers and repositories

pub mod books;

pub use books::{BookService, DefaultBookService};
