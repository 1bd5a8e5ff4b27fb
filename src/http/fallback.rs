//! Terminal responder for paths no source resolves.

use axum::Router;

/// Default terminal responder: greets on every path.
pub fn default_responder() -> Router {
    Router::new().fallback(hello)
}

async fn hello() -> &'static str {
    "Hello, world!\n"
}
