//! Logging middleware
//!
//! Records HTTP request and response information

use axum::{
    extract::Request,
    http::{HeaderValue, Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Response header carrying the generated request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Requests slower than this are logged as slow; generation calls are
/// expected to take seconds
const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(30);

/// Request logging middleware
///
/// Runs every request inside a span tagged with a fresh request id
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
    );

    let mut response = handle(method, uri, request, next).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn handle(method: Method, uri: Uri, request: Request, next: Next) -> Response {
    let start_time = Instant::now();

    info!(
        "Request started: {} {} - User-Agent: {}",
        method,
        uri.path(),
        request
            .headers()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    );

    let response = next.run(request).await;

    let duration = start_time.elapsed();
    let status = response.status();
    let millis = duration.as_secs_f64() * 1000.0;

    if status.is_success() {
        info!("Request completed: {} - Duration: {:.2}ms", status, millis);
    } else if status.is_client_error() {
        warn!("Client error: {} - Duration: {:.2}ms", status, millis);
    } else if status.is_server_error() {
        warn!("Server error: {} - Duration: {:.2}ms", status, millis);
    } else {
        info!("Request response: {} - Duration: {:.2}ms", status, millis);
    }

    if duration > SLOW_REQUEST_THRESHOLD {
        warn!(
            "Slow request detected: {} {} - Duration: {:.2}s",
            method,
            uri.path(),
            duration.as_secs_f64()
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::get, Router};
    use axum::http::Request as HttpRequest;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_request_id_header_added() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn(request_logging_middleware));

        let response = app
            .oneshot(HttpRequest::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let request_id = response.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(request_id).is_ok());
    }
}
