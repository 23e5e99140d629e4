//! Universal application server.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │                 APP SERVER                     │
//!   Client Request       │  ┌─────────┐   ┌─────────┐   ┌─────────────┐  │
//!   ─────────────────────┼─▶│   net   │──▶│  http   │──▶│ static dir  │  │
//!                        │  │listener │   │ server  │   └─────────────┘  │
//!                        │  └─────────┘   └────┬────┘                    │
//!                        │                     │ /api/**                 │
//!                        │                     ├────────▶ proxy ─────────┼──▶ API process
//!                        │                     │ other                   │
//!                        │                     ▼                         │
//!                        │  ┌───────┐   ┌────────┐   ┌────────────────┐  │
//!   Client Response      │  │  ui   │◀──│  tree  │◀──│ store + router │  │
//!   ◀────────────────────┼──│render │   │factory │   └────────────────┘  │
//!                        │  └───────┘   └────────┘                       │
//!                        └───────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use universal_app::config::{Environment, Overrides, resolve_config};
use universal_app::http::HttpServer;
use universal_app::lifecycle::{Shutdown, signals};
use universal_app::net::{self, ListenerError};
use universal_app::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "universal-app", version, about = "Universal application server")]
struct Cli {
    /// TOML config file
    #[arg(short, long, env = "APP_CONFIG")]
    config: Option<PathBuf>,

    /// Port to serve pages on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Port of the API process
    #[arg(long, env = "APIPORT")]
    api_port: Option<u16>,

    /// development or production
    #[arg(long = "env", env = "APP_ENV")]
    environment: Option<Environment>,

    /// Directory of static assets
    #[arg(long)]
    static_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = Overrides {
        port: cli.port,
        api_port: cli.api_port,
        environment: cli.environment,
        static_dir: cli.static_dir,
    };
    let config = resolve_config(cli.config.as_deref(), &overrides)?;

    logging::init(&config.observability.log_level)?;
    tracing::info!("universal-app v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = match net::bind(&config.server).await {
        Ok(listener) => listener,
        Err(ListenerError::MissingPort) => {
            tracing::error!("No PORT environment variable has been specified");
            return Ok(());
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to bind listener");
            return Err(e.into());
        }
    };
    let port = listener.local_addr()?.port();

    tracing::info!("Server is listening");
    tracing::info!(
        "{} running on port {}, API on port {}",
        config.server.name,
        port,
        config.api.port
    );

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move { signals::shutdown_on_ctrl_c(&shutdown).await }
    });

    HttpServer::new(config)?.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
