//! Middleware that injects the shared environment into a handler chain.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    context::Context,
    handler::{BoxHandler, Handler, Middleware},
    writer::ResponseWriter,
    Request,
};

/// Binds an environment to handler chains.
///
/// Every request through a wrapped handler gets its own `Context` with an
/// empty bag; the environment itself is shared by all of them.
pub struct Adapter<E> {
    env: Arc<E>,
}

impl<E> Adapter<E>
where
    E: Send + Sync + 'static,
{
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &Arc<E> {
        &self.env
    }

    /// Wraps `next` so it is invoked with a fresh `Context` in place of the
    /// writer it would have received.
    pub fn wrap<H: Handler>(&self, next: H) -> WithContext<E, H> {
        WithContext {
            env: Arc::clone(&self.env),
            next,
        }
    }
}

impl<E> Clone for Adapter<E> {
    fn clone(&self) -> Self {
        Self {
            env: Arc::clone(&self.env),
        }
    }
}

impl<E> Middleware for Adapter<E>
where
    E: Send + Sync + 'static,
{
    fn apply(&self, next: BoxHandler) -> BoxHandler {
        Arc::new(self.wrap(next))
    }
}

/// Handler returned by `Adapter::wrap`.
pub struct WithContext<E, H> {
    env: Arc<E>,
    next: H,
}

#[async_trait]
impl<E, H> Handler for WithContext<E, H>
where
    E: Send + Sync + 'static,
    H: Handler,
{
    async fn serve(&self, w: &mut dyn ResponseWriter, req: Request) {
        tracing::trace!(
            env = std::any::type_name::<E>(),
            method = %req.method(),
            path = %req.uri().path(),
            "Request context created"
        );

        let mut ctx = Context::new(w, Arc::clone(&self.env));
        self.next.serve(&mut ctx, req).await
    }
}
