//! Per-request tracing spans
//!
//! Every request gets an `http.request` span carrying method, matched route
//! and response status. With the `otel` feature the span is parented on the
//! caller's W3C `traceparent` header, so spans exported through
//! `tracing-opentelemetry` join the caller's trace.

use std::time::Duration;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use tracing::Span;

/// Build the span for an incoming request.
pub fn make_span(request: &Request<Body>) -> Span {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or_else(|| request.uri().path());

    let span = tracing::info_span!(
        "http.request",
        otel.name = %format!("{} {}", request.method(), route),
        otel.kind = "server",
        http.method = %request.method(),
        http.route = %route,
        http.status_code = tracing::field::Empty,
    );

    #[cfg(feature = "otel")]
    propagation::set_remote_parent(&span, request.headers());

    span
}

/// Record the status code and log completion.
pub fn on_response(response: &Response<Body>, latency: Duration, span: &Span) {
    let status = response.status().as_u16();
    span.record("http.status_code", status);
    tracing::debug!(status, latency_ms = latency.as_millis() as u64, "request finished");
}

#[cfg(feature = "otel")]
mod propagation {
    use axum::http::HeaderMap;
    use opentelemetry::propagation::Extractor;
    use tracing::Span;
    use tracing_opentelemetry::OpenTelemetrySpanExt;

    struct HeaderExtractor<'a>(&'a HeaderMap);

    impl Extractor for HeaderExtractor<'_> {
        fn get(&self, key: &str) -> Option<&str> {
            self.0.get(key).and_then(|v| v.to_str().ok())
        }

        fn keys(&self) -> Vec<&str> {
            self.0.keys().map(|k| k.as_str()).collect()
        }
    }

    /// Parent `span` on the trace context carried by `headers`, if any.
    pub(super) fn set_remote_parent(span: &Span, headers: &HeaderMap) {
        let parent = opentelemetry::global::get_text_map_propagator(|propagator| {
            propagator.extract(&HeaderExtractor(headers))
        });
        span.set_parent(parent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_without_matched_path_accepts_status() {
        let request = Request::builder()
            .uri("/books/7")
            .body(Body::empty())
            .unwrap();
        // No subscriber installed: the span is disabled but construction
        // must not panic on the empty status field.
        let span = make_span(&request);
        on_response(
            &Response::new(Body::empty()),
            Duration::from_millis(3),
            &span,
        );
    }
}
