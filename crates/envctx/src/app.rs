use std::sync::Arc;

use axum::{http::StatusCode, response::Response, routing::get, Router};
use envctx_core::{dispatch, Adapter, BoxHandler, Chain, Request};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    config::Config,
    env::AppEnv,
    handlers::{health::livez, whoami::WhoAmI},
    middleware::{assign_request_id, authenticate},
};

/// Builds the chain every context-aware endpoint runs behind.
///
/// The adapter comes first so the stages after it can recover the context.
pub fn create_chain(env: Arc<AppEnv>) -> Chain {
    Chain::new()
        .with(Adapter::new(env))
        .with(assign_request_id)
        .with(authenticate)
}

/// Create the application router with all routes and middleware.
pub fn create_app(env: Arc<AppEnv>, config: &Config) -> Router {
    let chain = create_chain(env);
    let whoami = chain.then(WhoAmI);

    Router::new()
        .route("/livez", get(livez))
        .route("/whoami", get(move |req: Request| serve(whoami, req)))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
}

async fn serve(handler: BoxHandler, req: Request) -> Response {
    dispatch(&handler, req).await
}
