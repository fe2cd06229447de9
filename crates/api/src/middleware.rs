use std::time::Instant;

use axum::{middleware::Next, response::Response};

/// One log event per request: method, path, status, latency.
///
/// 5xx responses are logged at `error`, 4xx at `warn`, the rest at `info`.
pub async fn request_logging(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let res = next.run(req).await;

    let status = res.status().as_u16();
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    if res.status().is_server_error() {
        tracing::error!(%method, %path, status, latency_ms, "request failed");
    } else if res.status().is_client_error() {
        tracing::warn!(%method, %path, status, latency_ms, "request rejected");
    } else {
        tracing::info!(%method, %path, status, latency_ms, "request handled");
    }

    res
}
