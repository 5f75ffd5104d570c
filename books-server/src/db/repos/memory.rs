//! In-process book repository
//!
//! Holds rows in a `Vec` behind a mutex and hands out ids from 1, mirroring
//! a `BIGSERIAL` column. Backs the router and handler tests; the server
//! itself always runs on [`PgBookRepo`](super::PgBookRepo).

use std::sync::Mutex;

use async_trait::async_trait;

use super::books::{BookRepository, DbError};
use crate::models::{Book, NewBook};

#[derive(Default)]
struct Table {
    rows: Vec<Book>,
    next_id: i64,
}

/// Book repository backed by process memory
#[derive(Default)]
pub struct MemoryBookRepo {
    table: Mutex<Table>,
}

impl MemoryBookRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Table> {
        // A poisoned table still holds consistent rows: every mutation is a
        // single push after the id is chosen.
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepo {
    async fn create(&self, book: NewBook) -> Result<Book, DbError> {
        let mut table = self.lock();
        table.next_id += 1;
        let stored = book.into_book(table.next_id);
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<Book>, DbError> {
        Ok(self.lock().rows.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Book, DbError> {
        self.lock()
            .rows
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| DbError::book_not_found(id))
    }
}
