pub mod health;
pub mod whoami;

use axum::http::{header, HeaderValue, StatusCode};
use envctx_core::{write_text, ResponseWriter};
use serde::Serialize;

/// Serializes `value` as the JSON response body.
pub fn write_json<T: Serialize>(w: &mut dyn ResponseWriter, status: StatusCode, value: &T) {
    match serde_json::to_vec(value) {
        Ok(body) => {
            w.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            w.write_status(status);
            w.write_body(&body);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response");
            write_text(
                w,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            );
        }
    }
}
