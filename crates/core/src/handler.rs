//! Handler and middleware composition.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{writer::ResponseWriter, Request};

/// A step in a handler chain.
///
/// Every handler has the same shape: it receives the writer and the request,
/// and replies through the writer. Middleware hands a possibly decorated
/// writer to the next handler.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn serve(&self, w: &mut dyn ResponseWriter, req: Request);
}

/// Type-erased, shareable handler.
pub type BoxHandler = Arc<dyn Handler>;

#[async_trait]
impl<H: Handler + ?Sized> Handler for Arc<H> {
    async fn serve(&self, w: &mut dyn ResponseWriter, req: Request) {
        (**self).serve(w, req).await
    }
}

/// Wraps a handler into another handler of the same shape.
pub trait Middleware: Send + Sync {
    fn apply(&self, next: BoxHandler) -> BoxHandler;
}

impl<F> Middleware for F
where
    F: Fn(BoxHandler) -> BoxHandler + Send + Sync,
{
    fn apply(&self, next: BoxHandler) -> BoxHandler {
        self(next)
    }
}

/// Ordered list of middleware ending in a handler.
///
/// The first middleware added is the outermost: it sees the request first.
#[derive(Clone, Default)]
pub struct Chain {
    layers: Vec<Arc<dyn Middleware>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `middleware` after the ones already in the chain.
    pub fn with<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.layers.push(Arc::new(middleware));
        self
    }

    /// Composes the chain around `handler`.
    pub fn then<H: Handler + 'static>(&self, handler: H) -> BoxHandler {
        self.layers
            .iter()
            .rev()
            .fold(Arc::new(handler) as BoxHandler, |next, layer| {
                layer.apply(next)
            })
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("layers", &self.layers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{dispatch, write_text};
    use axum::{body::Body, http::StatusCode};

    /// Appends its tag to the `x-trail` header, then calls the next handler.
    struct Tag {
        tag: &'static str,
        next: BoxHandler,
    }

    #[async_trait]
    impl Handler for Tag {
        async fn serve(&self, w: &mut dyn ResponseWriter, req: Request) {
            w.headers_mut().append("x-trail", self.tag.parse().unwrap());
            self.next.serve(w, req).await
        }
    }

    fn tag(tag: &'static str) -> impl Fn(BoxHandler) -> BoxHandler + Send + Sync {
        move |next| Arc::new(Tag { tag, next }) as BoxHandler
    }

    struct Done;

    #[async_trait]
    impl Handler for Done {
        async fn serve(&self, w: &mut dyn ResponseWriter, _req: Request) {
            write_text(w, StatusCode::OK, "done");
        }
    }

    fn request() -> Request {
        axum::http::Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn first_middleware_runs_first() {
        let chain = Chain::new().with(tag("outer")).with(tag("inner"));
        let handler = chain.then(Done);

        let response = dispatch(&handler, request()).await;

        let trail: Vec<_> = response
            .headers()
            .get_all("x-trail")
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(trail, ["outer", "inner"]);
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_chain_is_the_handler() {
        let chain = Chain::new();
        assert!(chain.is_empty());

        let response = dispatch(&chain.then(Done), request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("x-trail").is_none());
    }

    #[tokio::test]
    async fn chain_can_be_reused_for_several_handlers() {
        let chain = Chain::new().with(tag("shared"));
        assert_eq!(chain.len(), 1);

        let first = chain.then(Done);
        let second = chain.then(Done);

        for handler in [first, second] {
            let response = dispatch(&handler, request()).await;
            assert_eq!(response.headers()["x-trail"], "shared");
        }
    }
}
