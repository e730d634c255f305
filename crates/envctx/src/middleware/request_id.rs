use std::{fmt, sync::Arc};

use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue};
use envctx_core::{extract, BoxHandler, Handler, Request, ResponseWriter};
use tracing::Instrument;
use uuid::Uuid;

use super::REQUEST_ID;
use crate::{env::AppEnv, error::HandlerError};

const X_REQUEST_ID: &str = "x-request-id";

/// Correlates the log lines and the echoed `x-request-id` of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Keeps a well-formed id sent by the caller, otherwise mints a v4 one.
    fn resolve(headers: &HeaderMap) -> Self {
        let supplied = headers
            .get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<Uuid>().ok());

        Self(supplied.unwrap_or_else(Uuid::new_v4))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Stores the request id in the bag and echoes it back as `x-request-id`.
///
/// The rest of the chain runs inside a span carrying the id.
pub fn assign_request_id(next: BoxHandler) -> BoxHandler {
    Arc::new(AssignRequestId { next })
}

struct AssignRequestId {
    next: BoxHandler,
}

#[async_trait]
impl Handler for AssignRequestId {
    async fn serve(&self, w: &mut dyn ResponseWriter, req: Request) {
        let Some(mut ctx) = extract::<AppEnv>(w) else {
            return HandlerError::MissingContext.write_to(w);
        };

        let request_id = RequestId::resolve(req.headers());
        ctx.vars_mut().set_key(&REQUEST_ID, request_id);
        if let Ok(value) = HeaderValue::try_from(request_id.to_string()) {
            ctx.headers_mut().insert(X_REQUEST_ID, value);
        }

        let span = tracing::info_span!(
            "request",
            request_id = %request_id,
            method = %req.method(),
            path = %req.uri().path(),
        );
        self.next.serve(w, req).instrument(span).await
    }
}
