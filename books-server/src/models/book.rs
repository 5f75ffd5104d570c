//! The Book entity

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored book.
///
/// `id` is assigned by the storage layer on insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
}

/// Payload for creating a book.
///
/// Any `id` in the request body is ignored; unknown fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: Option<&str>) -> Self {
        Self {
            title: title.into(),
            author: author.map(str::to_owned),
        }
    }

    /// Attach a storage-assigned id.
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
        }
    }
}
