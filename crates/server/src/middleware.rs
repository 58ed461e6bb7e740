//! Request logging.

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::{error, info, warn};

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        error!(%method, %path, status = status.as_u16(), elapsed_ms, "request failed");
    } else if status.is_client_error() {
        warn!(%method, %path, status = status.as_u16(), elapsed_ms, "request rejected");
    } else {
        info!(%method, %path, status = status.as_u16(), elapsed_ms, "request served");
    }

    response
}
