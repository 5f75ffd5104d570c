//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::ApiError;

/// JSON object request body.
///
/// Content-Type is ignored. Anything that is not a top-level JSON object
/// (including arrays, which serde would otherwise map onto struct fields by
/// position) rejects with a 400 carrying the decoder's message.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidBody(e.body_text()))?;

        let object: Map<String, Value> = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::InvalidBody(e.to_string()))?;

        serde_json::from_value(Value::Object(object))
            .map(Self)
            .map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}

/// Book id from path.
///
/// A segment that is not an integer can never match a stored row, so it
/// rejects as not found rather than bad request.
pub struct BookId(pub i64);

impl<S> FromRequestParts<S> for BookId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound { resource: "Book" })?;

        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ApiError::NotFound { resource: "Book" })
    }
}
