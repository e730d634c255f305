//! Chain stages that run between the environment adapter and the endpoint.
//!
//! Each stage recovers the request context, records what it learned in the
//! bag under one of the keys below, and passes the writer on.

mod auth;
mod request_id;

use envctx_core::Key;

use crate::models::User;

pub use auth::authenticate;
pub use request_id::{assign_request_id, RequestId};

/// The authenticated caller, set by `authenticate`.
pub const USER: Key<User> = Key::new("user");

/// The request identifier, set by `assign_request_id`.
pub const REQUEST_ID: Key<RequestId> = Key::new("request_id");
