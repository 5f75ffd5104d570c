//! Book endpoints
//!
//! - POST /books       create, 201 with the stored book
//! - GET  /books       list every book
//! - GET  /books/{id}  single book, 404 `Book not found` when absent

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{BookId, JsonBody};
use crate::models::{Book, NewBook};
use crate::state::AppState;

/// POST /books - create a new book
#[tracing::instrument(name = "books.create", skip_all, fields(book.title = %new_book.title))]
async fn create_book(
    State(state): State<AppState>,
    JsonBody(new_book): JsonBody<NewBook>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = state.books().create(new_book).await?;
    tracing::info!(book.id = book.id, "book created");

    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /books - list all books
#[tracing::instrument(name = "books.list", skip_all)]
async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.books().get_all().await?;
    Ok(Json(books))
}

/// GET /books/{id} - get a single book
#[tracing::instrument(name = "books.get", skip_all, fields(book.id = id))]
async fn get_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> Result<Json<Book>, ApiError> {
    let book = state.books().get_one(id).await?;
    Ok(Json(book))
}

/// Book routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/{id}", get(get_book))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::db::repos::{DbError, MemoryBookRepo};
    use crate::service::{BookService, DefaultBookService};

    /// Service whose every call fails with a storage error
    #[derive(Default)]
    struct BrokenService {
        calls: AtomicUsize,
    }

    impl BrokenService {
        fn fail(&self) -> DbError {
            self.calls.fetch_add(1, Ordering::SeqCst);
            DbError::Sqlx(sqlx::Error::PoolTimedOut)
        }
    }

    #[async_trait]
    impl BookService for BrokenService {
        async fn create(&self, _: NewBook) -> Result<Book, DbError> {
            Err(self.fail())
        }

        async fn get_all(&self) -> Result<Vec<Book>, DbError> {
            Err(self.fail())
        }

        async fn get_one(&self, _: i64) -> Result<Book, DbError> {
            Err(self.fail())
        }
    }

    fn memory_app() -> Router {
        let repo = Arc::new(MemoryBookRepo::new());
        let service = Arc::new(DefaultBookService::new(repo));
        router().with_state(AppState::new(service))
    }

    fn broken_app() -> (Router, Arc<BrokenService>) {
        let service = Arc::new(BrokenService::default());
        let app = router().with_state(AppState::new(service.clone()));
        (app, service)
    }

    fn post_books(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/books")
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // =========================================================================
    // POST /books
    // =========================================================================

    #[tokio::test]
    async fn create_returns_201_with_assigned_id() {
        let response = memory_app()
            .oneshot(post_books(r#"{"title":"Test Book","author":"Author"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_ne!(body["id"].as_i64().unwrap(), 0);
        assert_eq!(body["title"], "Test Book");
        assert_eq!(body["author"], "Author");
    }

    #[tokio::test]
    async fn create_ignores_client_id() {
        let response = memory_app()
            .oneshot(post_books(r#"{"id":500,"title":"Dune"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["id"], 1);
    }

    #[tokio::test]
    async fn create_accepts_empty_object() {
        let response = memory_app().oneshot(post_books("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["title"], "");
        assert_eq!(body["author"], Value::Null);
    }

    #[tokio::test]
    async fn create_without_content_type_still_decodes() {
        let request = Request::builder()
            .method("POST")
            .uri("/books")
            .body(Body::from(r#"{"title":"Plain"}"#))
            .unwrap();

        let response = memory_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn malformed_json_is_400_and_skips_service() {
        let (app, service) = broken_app();

        let response = app.oneshot(post_books("{invalid-json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn type_mismatch_is_400() {
        let (app, service) = broken_app();

        let response = app.oneshot(post_books(r#"{"title": 12}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn array_body_is_400_and_skips_service() {
        for body in ["[]", r#"["Dune","Herbert"]"#] {
            let (app, service) = broken_app();

            let response = app.oneshot(post_books(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
            assert!(json_body(response).await["error"].is_string());
            assert_eq!(service.calls.load(Ordering::SeqCst), 0, "body {body}");
        }
    }

    #[tokio::test]
    async fn scalar_body_is_400() {
        for body in ["null", "42", r#""Dune""#] {
            let (app, service) = broken_app();

            let response = app.oneshot(post_books(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
            assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn create_storage_error_is_500() {
        let (app, service) = broken_app();

        let response = app
            .oneshot(post_books(r#"{"title":"Test Book"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("database error"));
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    // =========================================================================
    // GET /books
    // =========================================================================

    #[tokio::test]
    async fn list_initially_empty() {
        let response = memory_app().oneshot(get("/books")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn list_after_two_creates() {
        let app = memory_app();
        for title in ["B1", "B2"] {
            let body = json!({ "title": title }).to_string();
            let response = app.clone().oneshot(post_books(&body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app.oneshot(get("/books")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let books = body.as_array().expect("expected array");
        assert_eq!(books.len(), 2);
    }

    #[tokio::test]
    async fn list_storage_error_is_500() {
        let (app, _) = broken_app();

        let response = app.oneshot(get("/books")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json_body(response).await["error"].is_string());
    }

    // =========================================================================
    // GET /books/{id}
    // =========================================================================

    #[tokio::test]
    async fn create_then_get_round_trip() {
        let app = memory_app();
        let response = app
            .clone()
            .oneshot(post_books(r#"{"title":"Found","author":"Someone"}"#))
            .await
            .unwrap();
        let created = json_body(response).await;
        let id = created["id"].as_i64().unwrap();

        let response = app.oneshot(get(&format!("/books/{id}"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, created);
    }

    #[tokio::test]
    async fn unknown_id_is_404() {
        let response = memory_app().oneshot(get("/books/999")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, json!({"error": "Book not found"}));
    }

    #[tokio::test]
    async fn non_numeric_id_is_404() {
        let response = memory_app().oneshot(get("/books/abc")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, json!({"error": "Book not found"}));
    }

    #[tokio::test]
    async fn lookup_storage_error_is_500() {
        let (app, _) = broken_app();

        let response = app.oneshot(get("/books/1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
