//! Redirect handler.
//!
//! # Responsibilities
//! - Resolve the request path through the chain
//! - Resolved: `301 Moved Permanently` with `Location` set to the target
//! - Unresolved: hand the untouched request to the terminal responder
//! - Lookup failure: `500`, never delegated
//!
//! # Design Decisions
//! - Lookup key is the raw (still percent-encoded) URI path, query excluded
//! - Target is passed through verbatim; it is not re-validated or escaped
//! - No per-request mutable state

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tower::ServiceExt;

use crate::observability::metrics::{self, OUTCOME_ERROR, OUTCOME_RESOLVED, OUTCOME_UNRESOLVED};
use crate::routing::{LookupError, Resolution, ResolverChain};

/// Resolves request paths and either redirects or delegates.
#[derive(Clone)]
pub struct RedirectHandler {
    chain: Arc<ResolverChain>,
    terminal: Router,
}

impl RedirectHandler {
    pub fn new(chain: Arc<ResolverChain>, terminal: Router) -> Self {
        Self { chain, terminal }
    }

    /// Produce the full response for one request.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let path = request.uri().path().to_owned();
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        match self.chain.resolve(&path) {
            Ok(Resolution::Resolved { target, source }) => {
                metrics::record_lookup(OUTCOME_RESOLVED, &source);
                tracing::debug!(
                    request_id = %request_id,
                    path = %path,
                    source = %source,
                    location = %target,
                    "Redirecting"
                );
                permanent_redirect(&target)
            }
            Ok(Resolution::Unresolved) => {
                metrics::record_lookup(OUTCOME_UNRESOLVED, "none");
                tracing::debug!(request_id = %request_id, path = %path, "No source matched, delegating");
                self.delegate(request).await
            }
            Err(e) => {
                metrics::record_lookup(OUTCOME_ERROR, source_of(&e));
                tracing::error!(request_id = %request_id, path = %path, error = %e, "Lookup failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Lookup source unavailable").into_response()
            }
        }
    }

    async fn delegate(&self, request: Request<Body>) -> Response {
        let result: Result<Response, Infallible> = self.terminal.clone().oneshot(request).await;
        match result {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}

fn source_of(error: &LookupError) -> &str {
    match error {
        LookupError::Storage { source_name, .. }
        | LookupError::CorruptValue { source_name, .. } => source_name,
    }
}

/// Build a `301` pointing at `target`.
pub fn permanent_redirect(target: &str) -> Response {
    match HeaderValue::from_str(target) {
        Ok(location) => (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response(),
        Err(_) => {
            tracing::error!(location = %target, "Target is not a valid Location header value");
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect target").into_response()
        }
    }
}
