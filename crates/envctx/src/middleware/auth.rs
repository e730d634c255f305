//! Bearer-token identification stage.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use envctx_core::{extract, BoxHandler, Handler, Request, ResponseWriter};

use super::USER;
use crate::{env::AppEnv, error::HandlerError};

/// Resolves the `Authorization: Bearer` token through the environment's user
/// repository and stores the caller in the bag under `USER`.
///
/// Replies 401 and stops the chain when the token is missing or unknown.
pub fn authenticate(next: BoxHandler) -> BoxHandler {
    Arc::new(Authenticate { next })
}

struct Authenticate {
    next: BoxHandler,
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, HandlerError> {
    let header_value = headers
        .get(AUTHORIZATION)
        .ok_or(HandlerError::Unauthorized("Missing authorization header"))?
        .to_str()
        .map_err(|_| HandlerError::Unauthorized("Invalid authorization header"))?;

    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(HandlerError::Unauthorized("Expected a bearer token"))
}

#[async_trait]
impl Handler for Authenticate {
    async fn serve(&self, w: &mut dyn ResponseWriter, req: Request) {
        let Some(mut ctx) = extract::<AppEnv>(w) else {
            return HandlerError::MissingContext.write_to(w);
        };

        let token = match bearer_token(req.headers()) {
            Ok(token) => token,
            Err(err) => return err.write_to(&mut ctx),
        };

        let users = Arc::clone(&ctx.env().users);
        let user = match users.get_user_by_token(token).await {
            Ok(Some(user)) => user,
            Ok(None) => return HandlerError::Unauthorized("Unknown token").write_to(&mut ctx),
            Err(err) => return HandlerError::from(err).write_to(&mut ctx),
        };

        tracing::debug!(user_id = %user.id, "Request authenticated");
        ctx.vars_mut().set_key(&USER, user);

        self.next.serve(w, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization.parse().unwrap());
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        let headers = headers("Bearer alice-token");
        assert_eq!(bearer_token(&headers).unwrap(), "alice-token");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Unauthorized("Missing authorization header")
        ));
    }

    #[test]
    fn other_schemes_are_rejected() {
        let headers = headers("Basic YWxpY2U6c2VjcmV0");
        let err = bearer_token(&headers).unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Unauthorized("Expected a bearer token")
        ));
    }

    #[test]
    fn empty_token_is_rejected() {
        let headers = headers("Bearer   ");
        assert!(bearer_token(&headers).is_err());
    }
}
