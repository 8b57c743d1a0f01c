//! Logging middleware for request/response tracing.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, Level, info, span};

use super::RequestId;

/// Middleware that logs request and response information.
///
/// # Logged Information
/// - Request: HTTP method, path, request ID
/// - Response: status code, duration in milliseconds
///
/// Both events are emitted inside an `http_request` span so handler logs
/// carry the same request ID.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let span = span!(
        Level::INFO,
        "http_request",
        method = %method,
        uri = %uri,
        request_id = %request_id
    );

    async move {
        info!(method = %method, path = %uri.path(), "Request received");

        let start = Instant::now();
        let response = next.run(request).await;
        let duration = start.elapsed();

        if response.status().is_server_error() {
            tracing::warn!(
                status = response.status().as_u16(),
                duration_ms = duration.as_millis() as u64,
                "Response sent"
            );
        } else {
            info!(
                status = response.status().as_u16(),
                duration_ms = duration.as_millis() as u64,
                "Response sent"
            );
        }

        response
    }
    .instrument(span)
    .await
}
