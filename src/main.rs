//! JSKOS Linked Data gateway.
//!
//! Serves the items of a URI namespace as HTML pages, JSON or RDF,
//! fetched from a JSKOS API or a local file.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ http server ──▶ uri normalize ──▶ negotiation ──▶ backend
//!                    (request id,     (redirect or      (format=      (file or
//!                     trace, timeout)  resource URI)     or Accept)    JSKOS API)
//!                                                                        │
//!     Client Response                                                    ▼
//!     ◀───────────── response ◀─────────────────────── views / rdf serializer
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use jskos_proxy::config::{load_config, validate_config, ConfigError, GatewayConfig};
use jskos_proxy::lifecycle::{build_dispatcher, wait_for_signal, Shutdown};
use jskos_proxy::observability::{init_logging, init_metrics};
use jskos_proxy::GatewayServer;

#[derive(Parser)]
#[command(name = "jskos-proxy")]
#[command(about = "Linked Data gateway for JSKOS items", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Namespace URI, overriding the configuration
    #[arg(short, long)]
    namespace: Option<String>,

    /// Bind address, overriding the configuration
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(namespace) = cli.namespace {
        config.namespace = namespace;
    }
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability);
    tracing::info!("jskos-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        namespace = %config.namespace,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        init_metrics(addr)?;
    }

    let dispatcher = Arc::new(build_dispatcher(&config)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(dispatcher, &config.timeouts);
    let server = tokio::spawn(server.run(listener, shutdown.subscribe()));

    wait_for_signal().await;
    shutdown.trigger();
    server.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
