//! `GET /whoami`: reports what the chain learned about the caller.

use async_trait::async_trait;
use axum::http::StatusCode;
use envctx_core::{extract, Handler, Request, ResponseWriter};
use serde::Serialize;

use super::write_json;
use crate::{
    env::AppEnv,
    error::HandlerError,
    middleware::{REQUEST_ID, USER},
    models::User,
};

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub service: String,
    pub request_id: Option<String>,
    pub user: User,
}

/// Endpoint handler. Expects `authenticate` to have run before it.
pub struct WhoAmI;

#[async_trait]
impl Handler for WhoAmI {
    async fn serve(&self, w: &mut dyn ResponseWriter, _req: Request) {
        let Some(mut ctx) = extract::<AppEnv>(w) else {
            return HandlerError::MissingContext.write_to(w);
        };

        let Some(user) = ctx.vars().get_key(&USER).cloned() else {
            return HandlerError::Unauthorized("Not authenticated").write_to(&mut ctx);
        };

        let response = WhoAmIResponse {
            service: ctx.env().name.clone(),
            request_id: ctx.vars().get_key(&REQUEST_ID).map(ToString::to_string),
            user,
        };

        write_json(&mut ctx, StatusCode::OK, &response);
    }
}
