//! Stock series HTTP server.
//!
//! This binary exposes the series core of `stock_common` over HTTP and serves the
//! browser chart that consumes it. Internally, it wires together three building blocks:
//!
//! - `SymbolRegistry` — the immutable set of servable symbols, loaded once at startup
//!   from `--symbols-file` or the built-in defaults.
//! - `SeriesGenerator` — the seeded random-walk generator with its failure injection
//!   policy, configured from the command line (see `args`).
//! - `routes` — the axum router mapping `/stocks` and `/stocks/{symbol}` onto the two
//!   core operations and every other path onto the static chart files.
//!
//! Concurrency and shutdown:
//! - Handlers run on the multi-threaded tokio runtime and share the registry and the
//!   generator through `Arc`s; neither is mutated after startup, so no locks are taken.
//! - Ctrl+C triggers a graceful shutdown: in-flight requests finish, new ones are refused.
//! - Failures are logged here and in the handlers; the core only returns typed errors.
#![warn(missing_docs)]
use crate::args::Args;
use crate::routes::AppState;
use clap::Parser;
use log::{error, info};
use std::sync::Arc;
use stock_common::net::addr;
use stock_common::{Result, SeriesGenerator};
use tokio::net::TcpListener;

mod args;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let registry = Arc::new(args.load_registry()?);
    info!(
        "Serving {} symbols: {}",
        registry.len(),
        registry
            .list_symbols()
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let generator = SeriesGenerator::new(registry, args.generator_config()?)?;
    info!("Generator config: {:?}", generator.config());

    let app = routes::router(AppState::new(generator), &args.static_dir);
    info!("Static files from: {}", args.static_dir.display());

    let listener = TcpListener::bind(addr(&args.host, args.port)).await?;
    info!("Server is running on: {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received. Shutting down server..."),
        Err(e) => {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
