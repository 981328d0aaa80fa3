//! Defense gateway binary.
//!
//! ```text
//!                         ┌──────────────────────────────────────────┐
//!                         │              VAKT GATEWAY                 │
//!     Client Request      │                                           │
//!     ────────────────────┼─▶ headers → ip block → rate limit         │
//!                         │     → sanitize → SQL/XSS detect ──────────┼──▶ Business
//!     Client Response     │                                           │    backend
//!     ◀───────────────────┼── forward handler ◀───────────────────────┼────
//!                         │                                           │
//!                         │  Cross-cutting: config, observability,    │
//!                         │  audit trail, admin API, lifecycle        │
//!                         └──────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use vakt::config::{load_config, GatewayConfig};
use vakt::lifecycle::Shutdown;
use vakt::observability::{logging, metrics};
use vakt::HttpServer;

#[derive(Parser)]
#[command(name = "vakt")]
#[command(about = "Request defense gateway for the salon platform", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        "vakt starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.listen_for_ctrl_c();

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
