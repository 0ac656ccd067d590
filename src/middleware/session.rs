//! Session boundary: resolves a verified identity for every request.
//!
//! This middleware never rejects. A missing header, an unparsable value, or
//! a token that fails verification all resolve to an anonymous identity;
//! routes that need a logged-in caller enforce that themselves.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;

use crate::AppState;

/// The caller's identity as resolved from the bearer token: a verified
/// email, or `None` for anonymous requests. Anonymous is a normal outcome,
/// not an error.
#[derive(Debug, Clone, Default)]
pub struct Identity(pub Option<String>);

impl Identity {
    pub fn email(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| state.tokens.verify(token).ok())
        .map(|claims| claims.username);

    request.extensions_mut().insert(Identity(identity));

    next.run(request).await
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Identity>()
            .cloned()
            .unwrap_or_default())
    }
}
