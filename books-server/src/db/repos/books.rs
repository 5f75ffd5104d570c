//! Book repository
//!
//! - create: INSERT ... RETURNING (id assigned by the database)
//! - find_all: plain SELECT, no pagination
//! - find_by_id: fetch_optional, zero rows mapped to NotFound

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Book, NewBook};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub fn book_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "Book",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Storage operations for books.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert a row and return it with its generated id.
    async fn create(&self, book: NewBook) -> Result<Book, DbError>;

    /// Every stored book. Empty when the table is empty.
    async fn find_all(&self) -> Result<Vec<Book>, DbError>;

    /// The book with this id, or `DbError::NotFound`.
    async fn find_by_id(&self, id: i64) -> Result<Book, DbError>;
}

/// PostgreSQL-backed book repository
#[derive(Clone)]
pub struct PgBookRepo {
    pool: PgPool,
}

impl PgBookRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepo {
    #[tracing::instrument(
        name = "db.books.create",
        skip_all,
        fields(db.system = "postgresql", db.operation = "INSERT", book.id = tracing::field::Empty)
    )]
    async fn create(&self, book: NewBook) -> Result<Book, DbError> {
        let stored = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author)
            VALUES ($1, $2)
            RETURNING id, title, author
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .fetch_one(&self.pool)
        .await?;

        tracing::Span::current().record("book.id", stored.id);
        Ok(stored)
    }

    #[tracing::instrument(
        name = "db.books.find_all",
        skip_all,
        fields(db.system = "postgresql", db.operation = "SELECT")
    )]
    async fn find_all(&self) -> Result<Vec<Book>, DbError> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    #[tracing::instrument(
        name = "db.books.find_by_id",
        skip(self),
        fields(db.system = "postgresql", db.operation = "SELECT")
    )]
    async fn find_by_id(&self, id: i64) -> Result<Book, DbError> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::book_not_found(id))
    }
}
