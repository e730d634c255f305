//! Request-scoped context module.
//!
//! `Context` bundles request-scoped values with the application-scoped
//! environment, and `extract` recovers it from the writer a handler was
//! given.

mod extract;
mod types;
mod vars;

pub use extract::{extract, ContextMut};
pub use types::Context;
pub use vars::{Key, Vars};
