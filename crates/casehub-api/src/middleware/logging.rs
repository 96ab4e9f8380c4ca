//! Request/response logging middleware.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::info;

/// Logs request method, path, status, and duration.
///
/// Invite tokens and access codes travel in the path and are masked.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = mask_secrets(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "HTTP request"
    );

    response
}

/// Replace the secret segment of invite and access-code paths with `***`.
pub fn mask_secrets(path: &str) -> String {
    let mut segments: Vec<&str> = path.split('/').collect();
    for i in 1..segments.len() {
        let public_secret = i == 3
            && segments[1] == "api"
            && matches!(segments[2], "invites" | "access");
        if public_secret || segments[i - 1] == "access-codes" {
            segments[i] = "***";
        }
    }
    segments.join("/")
}
