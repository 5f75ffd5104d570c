//! Book service
//!
//! Forwards every call to the repository and returns its result unchanged.
//! Handlers depend on the [`BookService`] trait so tests can swap in a stub.

use std::sync::Arc;

use async_trait::async_trait;

use crate::db::repos::{BookRepository, DbError};
use crate::models::{Book, NewBook};

#[async_trait]
pub trait BookService: Send + Sync {
    async fn create(&self, book: NewBook) -> Result<Book, DbError>;
    async fn get_all(&self) -> Result<Vec<Book>, DbError>;
    async fn get_one(&self, id: i64) -> Result<Book, DbError>;
}

/// Pass-through service over any [`BookRepository`]
#[derive(Clone)]
pub struct DefaultBookService {
    repo: Arc<dyn BookRepository>,
}

impl DefaultBookService {
    pub fn new(repo: Arc<dyn BookRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl BookService for DefaultBookService {
    async fn create(&self, book: NewBook) -> Result<Book, DbError> {
        self.repo.create(book).await
    }

    async fn get_all(&self) -> Result<Vec<Book>, DbError> {
        self.repo.find_all().await
    }

    async fn get_one(&self, id: i64) -> Result<Book, DbError> {
        self.repo.find_by_id(id).await
    }
}
