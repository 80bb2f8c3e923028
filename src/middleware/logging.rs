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

/// Response header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Two prediction attempts at the default timeout fit under this
const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(20);

/// Request logging middleware
///
/// Opens a span per request, logs status and duration and echoes the
/// request id back to the caller.
pub async fn request_logging_middleware(
    method: Method,
    uri: Uri,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
    );

    let mut response = async {
        info!("Request started: {} {}", method, uri);
        let response = next.run(request).await;
        log_completion(&method, &uri, &response, start_time.elapsed());
        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

fn log_completion(method: &Method, uri: &Uri, response: &Response, duration: Duration) {
    let status = response.status();
    let millis = duration.as_secs_f64() * 1000.0;

    if status.is_success() {
        info!("Request completed: {} - Duration: {:.2}ms", status, millis);
    } else if status.is_client_error() {
        warn!("Client error: {} - Duration: {:.2}ms", status, millis);
    } else if status.is_server_error() {
        tracing::error!("Server error: {} {} - Status code: {}", method, uri, status);
    } else {
        info!("Request response: {} - Duration: {:.2}ms", status, millis);
    }

    if duration > SLOW_REQUEST_THRESHOLD {
        warn!(
            "Slow request detected: {} {} - Duration: {:.2}s",
            method,
            uri,
            duration.as_secs_f64()
        );
    }
}
