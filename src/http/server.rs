//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router that sends every path to the redirect handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::fallback::default_responder;
use crate::http::redirect::RedirectHandler;
use crate::routing::ResolverChain;

/// HTTP server for the redirect service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server that delegates unresolved paths to the default responder.
    pub fn new(config: AppConfig, chain: ResolverChain) -> Self {
        Self::with_terminal(config, chain, default_responder())
    }

    /// Create a server with a custom terminal responder.
    pub fn with_terminal(config: AppConfig, chain: ResolverChain, terminal: Router) -> Self {
        tracing::info!(
            layers = ?chain.source_names(),
            "Resolver chain assembled"
        );
        let handler = RedirectHandler::new(Arc::new(chain), terminal);
        let router = Self::build_router(&config, handler);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, handler: RedirectHandler) -> Router {
        Router::new()
            .route("/{*path}", any(redirect_handler))
            .route("/", any(redirect_handler))
            .with_state(handler)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Entry point for every request path.
async fn redirect_handler(State(handler): State<RedirectHandler>, request: Request<Body>) -> Response {
    handler.handle(request).await
}
