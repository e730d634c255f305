//! Per-request context propagation for handler chains.
//!
//! This crate provides:
//! - The `ResponseWriter` capability every handler writes its reply through
//! - `Context`, a writer decorator carrying a shared environment and a
//!   request-scoped bag of values
//! - `Adapter`, the middleware that builds a fresh `Context` per request
//! - `extract`, which recovers the `Context` further down the chain
//! - `Chain` and `dispatch` to compose handlers and run them under axum

mod adapter;
mod context;
mod handler;
mod response;
mod writer;

pub use adapter::{Adapter, WithContext};
pub use context::{extract, Context, ContextMut, Key, Vars};
pub use handler::{BoxHandler, Chain, Handler, Middleware};
pub use response::{dispatch, write_text, BufferedResponse};
pub use writer::{ErasedContext, ResponseWriter};

/// Request type flowing through handler chains.
pub use axum::extract::Request;
