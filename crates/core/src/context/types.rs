//! The per-request context decorator.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};

use super::Vars;
use crate::writer::{ErasedContext, ResponseWriter};

/// Per-request decorator around the writer a handler chain was invoked with.
///
/// Carries the shared environment `E` and a fresh `Vars` bag. Every writer
/// operation is forwarded unchanged to the wrapped writer, so a `Context` can
/// be handed to any handler expecting a `ResponseWriter`, including another
/// `Adapter`.
pub struct Context<'w, E> {
    inner: &'w mut dyn ResponseWriter,
    env: Arc<E>,
    vars: Vars,
}

impl<'w, E> Context<'w, E> {
    /// Wraps `inner` with an empty bag bound to `env`.
    pub fn new(inner: &'w mut dyn ResponseWriter, env: Arc<E>) -> Self {
        Self {
            inner,
            env,
            vars: Vars::new(),
        }
    }

    pub fn env(&self) -> &Arc<E> {
        &self.env
    }

    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.vars.get(key)
    }

    pub fn set<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.vars.set(key, value)
    }

    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut Vars {
        &mut self.vars
    }
}

impl<E: Send + Sync + 'static> ResponseWriter for Context<'_, E> {
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
        let ctx: &mut dyn ErasedContext = self;
        Some(ctx)
    }
}

impl<E: Send + Sync + 'static> ErasedContext for Context<'_, E> {
    fn env_any(&self) -> Arc<dyn Any + Send + Sync> {
        self.env.clone()
    }

    fn vars(&self) -> &Vars {
        &self.vars
    }

    fn vars_mut(&mut self) -> &mut Vars {
        &mut self.vars
    }
}

impl<E> fmt::Debug for Context<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("env", &std::any::type_name::<E>())
            .field("vars", &self.vars)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::BufferedResponse;

    #[derive(Debug, PartialEq)]
    struct Env {
        name: &'static str,
    }

    #[test]
    fn new_context_starts_with_empty_bag() {
        let env = Arc::new(Env { name: "db" });
        let mut writer = BufferedResponse::new();
        let ctx = Context::new(&mut writer, env.clone());

        assert!(ctx.vars().is_empty());
        assert!(Arc::ptr_eq(ctx.env(), &env));
        assert_eq!(ctx.env().name, "db");
    }

    #[test]
    fn get_returns_last_value_set() {
        let mut writer = BufferedResponse::new();
        let mut ctx = Context::new(&mut writer, Arc::new(Env { name: "db" }));

        assert!(ctx.get::<&str>("user").is_none());
        ctx.set("user", "alice");
        ctx.set("user", "bob");
        assert_eq!(ctx.get::<&str>("user"), Some(&"bob"));
    }

    #[test]
    fn writes_pass_through_to_inner_writer() {
        let mut writer = BufferedResponse::new();
        {
            let mut ctx = Context::new(&mut writer, Arc::new(Env { name: "db" }));
            ctx.write_status(StatusCode::CREATED);
            ctx.headers_mut()
                .insert("x-stage", "context".parse().unwrap());
            ctx.write_body(b"hello ");
            ctx.write_body(b"world");
        }

        assert_eq!(writer.status(), StatusCode::CREATED);
        assert_eq!(writer.headers()["x-stage"], "context");
        assert_eq!(writer.body(), b"hello world");
    }

    #[test]
    fn context_answers_as_context() {
        let mut writer = BufferedResponse::new();
        let mut ctx = Context::new(&mut writer, Arc::new(Env { name: "db" }));
        ctx.set("user", 42u32);

        let erased = ctx.as_context().expect("context should recover itself");
        assert_eq!(erased.vars().get::<u32>("user"), Some(&42));
        assert!(erased.env_any().downcast::<Env>().is_ok());
    }

    #[test]
    fn debug_does_not_require_debug_env() {
        struct Opaque;

        let mut writer = BufferedResponse::new();
        let ctx = Context::new(&mut writer, Arc::new(Opaque));

        assert!(format!("{ctx:?}").contains("Opaque"));
    }
}
