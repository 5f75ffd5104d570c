//! Application state shared across handlers

use std::sync::Arc;

use crate::service::BookService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    books: Arc<dyn BookService>,
}

impl AppState {
    pub fn new(books: Arc<dyn BookService>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { books }),
        }
    }

    pub fn books(&self) -> &dyn BookService {
        self.inner.books.as_ref()
    }
}
