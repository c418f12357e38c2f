//! route-binder
//!
//! Compiles HTTP binding annotations from service descriptors into route
//! tables, prints them, or serves them with stub handlers.
//!
//! # Architecture Overview
//!
//! ```text
//!   descriptor.json ──▶ descriptor ──▶ binding ──▶ Vec<ServiceBinding>
//!                                                     │
//!                         ┌───────────────────────────┴──────────────┐
//!                         ▼                                          ▼
//!             lifecycle::build_manifest                  lifecycle::build_tables
//!             (routes: JSON manifest)                    (serve: groups → tables)
//!                                                                    │
//!                                                                    ▼
//!                                                       http: axum server
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use route_binder::config::{load_config, BinderConfig};
use route_binder::descriptor::load_descriptors;
use route_binder::http::{access_log, echo_resolver, request_id, HttpServer};
use route_binder::lifecycle::{build_manifest, build_tables};
use route_binder::observability::init_logging;

#[derive(Parser)]
#[command(name = "route-binder")]
#[command(about = "Compile HTTP bindings of RPC services into route tables", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route manifest of a descriptor file
    Routes {
        /// JSON descriptor file
        descriptor: PathBuf,
    },
    /// Serve the bindings with stub handlers
    Serve {
        /// JSON descriptor file
        descriptor: PathBuf,

        /// Override the configured bind address
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BinderConfig::default(),
    };
    init_logging(&config.observability.log_level);

    match cli.command {
        Commands::Routes { descriptor } => {
            let files = load_descriptors(&descriptor)?;
            let entries = build_manifest(&files, &config.routing)?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Commands::Serve { descriptor, bind } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }

            let files = load_descriptors(&descriptor)?;
            let tables = build_tables(
                &files,
                &config.routing,
                &[request_id(), access_log()],
                &echo_resolver,
            )?;

            tracing::info!(
                bind_address = %config.server.bind_address,
                tables = tables.len(),
                routes = tables.iter().map(|t| t.len()).sum::<usize>(),
                "Configuration loaded"
            );

            let listener = TcpListener::bind(&config.server.bind_address).await?;
            HttpServer::new(tables, config.server.clone()).run(listener).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
