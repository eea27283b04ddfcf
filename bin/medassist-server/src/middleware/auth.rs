//! Bearer-token gate for the chat API.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::error::ServerError;
use crate::state::AppState;

/// Token after `Bearer `, if the header has that prefix. An empty token is
/// still a token; the verifier rejects it.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Pass-through when no verifier is configured; otherwise 401 without a
/// bearer token and 403 when the identity provider rejects it.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let Some(verifier) = state.verifier.as_ref() else {
        return next.run(req).await;
    };

    let Some(token) = bearer_token(req.headers()) else {
        return ServerError::Unauthorized.into_response();
    };

    if !verifier.verify(token).await {
        warn!("rejected chat request with invalid or expired session token");
        return ServerError::Forbidden.into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn extracts_token_after_prefix() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
    }

    #[test]
    fn rejects_missing_header_and_other_schemes() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("bearer abc")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
    }

    #[test]
    fn empty_token_after_prefix_is_passed_on() {
        assert_eq!(bearer_token(&headers("Bearer ")), Some(""));
    }
}
