//! Buffering writer used to run handler chains under axum.

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{handler::Handler, writer::ResponseWriter, Request};

/// Writer that records the status, headers and body a handler produces.
///
/// The first status written wins; later writes are ignored. Writing body
/// bytes without a status implies `200 OK`.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status that will be sent, `200 OK` if none was written.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl ResponseWriter for BufferedResponse {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        match self.status {
            None => self.status = Some(status),
            Some(current) => {
                tracing::warn!(
                    current = %current,
                    ignored = %status,
                    "Superfluous status write"
                );
            }
        }
    }

    fn write_body(&mut self, chunk: &[u8]) {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(chunk);
    }
}

impl IntoResponse for BufferedResponse {
    fn into_response(self) -> Response {
        (self.status(), self.headers, self.body).into_response()
    }
}

/// Writes a plain-text reply.
pub fn write_text(w: &mut dyn ResponseWriter, status: StatusCode, body: &str) {
    w.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    w.write_status(status);
    w.write_body(body.as_bytes());
}

/// Runs `handler` against a fresh `BufferedResponse` and returns what it wrote.
pub async fn dispatch<H>(handler: &H, req: Request) -> Response
where
    H: Handler + ?Sized,
{
    let mut writer = BufferedResponse::new();
    handler.serve(&mut writer, req).await;
    writer.into_response()
}
