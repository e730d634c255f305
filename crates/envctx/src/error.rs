use axum::http::{header, HeaderValue, StatusCode};
use envctx_core::{write_text, ResponseWriter};
use thiserror::Error;

use crate::storage::RepositoryError;

/// Errors a handler in the chain can reply with.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The chain was built without the environment adapter in front.
    #[error("request context missing")]
    MissingContext,

    /// The caller could not be identified.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// User storage failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl HandlerError {
    /// Writes this error as the response.
    ///
    /// Client errors are returned as-is; server errors are logged and masked.
    pub fn write_to(self, w: &mut dyn ResponseWriter) {
        let (status, message) = match &self {
            Self::MissingContext => {
                tracing::error!("Handler invoked without request context; check chain wiring");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                )
            }
            Self::Unauthorized(reason) => {
                w.headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                (StatusCode::UNAUTHORIZED, reason.to_string())
            }
            Self::Repository(err) => {
                tracing::error!(error = %err, "User lookup failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        write_text(w, status, &message);
    }
}
