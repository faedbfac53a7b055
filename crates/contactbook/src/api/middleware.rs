use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{info, Instrument};

use super::AppState;

const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";
const ALLOWED_HEADERS: &str = "content-type";

/// Log method, path, status and latency of every request.
pub(crate) async fn request_logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!("http.request", method = %method, path = %path);

    let started = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let latency_ms = started.elapsed().as_millis();

    span.in_scope(|| {
        info!(
            status = response.status().as_u16(),
            latency_ms = u64::try_from(latency_ms).unwrap_or(u64::MAX),
            "Request completed"
        );
    });
    response
}

/// Answer CORS preflights and tag responses for allowed origins.
pub(crate) async fn cors_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok());
    let allow_origin = allowed_origin(state.cors_allowed_origins(), origin);

    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        if let Some(origin) = allow_origin {
            let headers = response.headers_mut();
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            );
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOWED_HEADERS),
            );
        }
        return response;
    }

    let mut response = next.run(request).await;
    if let Some(origin) = allow_origin {
        response
            .headers_mut()
            .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    }
    response
}

/// The `access-control-allow-origin` value for a request, if any.
///
/// A `*` entry allows every origin, including requests without one.
fn allowed_origin(allowed: &[String], origin: Option<&str>) -> Option<HeaderValue> {
    if allowed.iter().any(|o| o == "*") {
        return Some(HeaderValue::from_static("*"));
    }
    let origin = origin?;
    if allowed.iter().any(|o| o == origin) {
        HeaderValue::from_str(origin).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origins(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_wildcard_allows_any_origin() {
        let allowed = origins(&["*"]);
        assert_eq!(
            allowed_origin(&allowed, Some("http://evil.example")).unwrap(),
            "*"
        );
        assert_eq!(allowed_origin(&allowed, None).unwrap(), "*");
    }

    #[test]
    fn test_listed_origin_is_echoed() {
        let allowed = origins(&["http://localhost:3000"]);
        assert_eq!(
            allowed_origin(&allowed, Some("http://localhost:3000")).unwrap(),
            "http://localhost:3000"
        );
    }

    #[test]
    fn test_unlisted_origin_is_refused() {
        let allowed = origins(&["http://localhost:3000"]);
        assert!(allowed_origin(&allowed, Some("http://other:3000")).is_none());
        assert!(allowed_origin(&allowed, None).is_none());
    }

    #[test]
    fn test_empty_list_refuses_everything() {
        assert!(allowed_origin(&[], Some("http://localhost:3000")).is_none());
    }
}
