//! urlshort: redirect request paths to their configured URLs.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                      URLSHORT                         │
//!                     │                                                       │
//!  Client Request     │  ┌─────────┐    ┌──────────┐    ┌─────────────────┐  │
//!  ───────────────────┼─▶│  http   │───▶│ redirect │───▶│ resolver chain  │  │
//!                     │  │ server  │    │ handler  │    │ map → yaml →    │  │
//!                     │  └─────────┘    └────┬─────┘    │ json → store    │  │
//!                     │                      │          └────────┬────────┘  │
//!  Client Response    │        301 Location  │  unresolved       │           │
//!  ◀──────────────────┼──────────────────────┤──────────▶ terminal responder │
//!                     │                      │                   ▼           │
//!                     │                      │          ┌─────────────────┐  │
//!                     │                      └── 500 ◀──│  sled path store│  │
//!                     │                                 └─────────────────┘  │
//!                     └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use urlshort::config::{load_config, AppConfig, LayerKind};
use urlshort::http::HttpServer;
use urlshort::lifecycle::signals::trigger_on_signal;
use urlshort::lifecycle::{assemble_chain, Shutdown, StartupError};
use urlshort::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "urlshort")]
#[command(about = "Redirect request paths to URLs from a map, path files and a persistent store", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a YAML paths file
    #[arg(long)]
    yaml: Option<PathBuf>,

    /// Path to a JSON paths file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Path to the path store database
    #[arg(long)]
    db: Option<PathBuf>,

    /// Address to listen on, as host:port
    #[arg(long)]
    bind: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig, StartupError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => AppConfig::default(),
        };
        if let Some(file) = self.yaml {
            config.set_layer_file(LayerKind::Yaml, file);
        }
        if let Some(file) = self.json {
            config.set_layer_file(LayerKind::Json, file);
        }
        if let Some(db) = self.db {
            config.store.path = db;
        }
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("urlshort v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        store = %config.store.path.display(),
        layers = config.layers.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Opening the store may sleep while waiting for its lock.
    let chain = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || assemble_chain(&config)).await??
    };

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(trigger_on_signal(shutdown.clone()));

    let server = HttpServer::new(config, chain);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
