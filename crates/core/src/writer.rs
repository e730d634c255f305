//! The response capability handed to every handler.

use std::any::Any;
use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};

use crate::context::Vars;

/// Something a handler can write its response into.
///
/// Implementations are substitutable for one another: a decorator that
/// forwards these calls to an inner writer can stand in wherever a writer is
/// expected.
pub trait ResponseWriter: Send {
    /// Headers to send with the response.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Sets the response status code.
    fn write_status(&mut self, status: StatusCode);

    /// Appends bytes to the response body.
    fn write_body(&mut self, chunk: &[u8]);

    /// Returns the request context if this writer is one.
    ///
    /// Only the context decorator answers `Some`. Wrappers that do not
    /// override this hide the context from `extract`.
    fn as_context(&mut self) -> Option<&mut dyn ErasedContext> {
        None
    }
}

/// Type-erased view of a `Context`, used by `extract` to recover it.
pub trait ErasedContext: ResponseWriter {
    /// The bound environment, to be narrowed by the caller.
    fn env_any(&self) -> Arc<dyn Any + Send + Sync>;

    fn vars(&self) -> &Vars;

    fn vars_mut(&mut self) -> &mut Vars;
}
