//! Health check endpoint.

use axum::http::StatusCode;

/// GET /livez - Basic liveness check.
///
/// Returns 200 immediately. Bypasses the handler chain entirely.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}
