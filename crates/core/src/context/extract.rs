//! Recovering the context from a writer further down the chain.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};

use super::Vars;
use crate::writer::{ErasedContext, ResponseWriter};

/// Handle to a `Context` recovered by `extract`.
///
/// Writes made through the handle reach the same wrapped writer the context
/// forwards to, and passing the handle on keeps the context recoverable.
pub struct ContextMut<'a, E> {
    env: Arc<E>,
    inner: &'a mut dyn ErasedContext,
}

/// Recovers the request context bound to an environment of type `E`.
///
/// Returns `None` when `w` is not a context, when the context is bound to an
/// environment of another type, or when an intermediate handler wrapped the
/// context in a writer that does not forward `as_context`. Callers decide how
/// to treat absence; it usually means the chain was wired without an
/// `Adapter`.
pub fn extract<E>(w: &mut dyn ResponseWriter) -> Option<ContextMut<'_, E>>
where
    E: Send + Sync + 'static,
{
    let inner = w.as_context()?;
    let env = inner.env_any().downcast::<E>().ok()?;
    Some(ContextMut { env, inner })
}

impl<E> ContextMut<'_, E> {
    pub fn env(&self) -> &Arc<E> {
        &self.env
    }

    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.inner.vars().get(key)
    }

    pub fn set<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.inner.vars_mut().set(key, value)
    }

    pub fn vars(&self) -> &Vars {
        self.inner.vars()
    }

    pub fn vars_mut(&mut self) -> &mut Vars {
        self.inner.vars_mut()
    }
}

impl<E: Send + Sync> ResponseWriter for ContextMut<'_, E> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    fn write_status(&mut self, status: StatusCode) {
        self.inner.write_status(status)
    }

    fn write_body(&mut self, chunk: &[u8]) {
        self.inner.write_body(chunk)
    }

    fn as_context(&mut self) -> Option<&mut dyn ErasedContext> {
        let ctx: &mut dyn ErasedContext = &mut *self.inner;
        Some(ctx)
    }
}

impl<E> fmt::Debug for ContextMut<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMut")
            .field("env", &std::any::type_name::<E>())
            .field("vars", self.inner.vars())
            .finish_non_exhaustive()
    }
}
