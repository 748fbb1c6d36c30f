// main.rs

mod commands;
mod config;
mod error;
mod fleet;
mod html;
mod logging;
mod map;
mod notifications;
mod render;
mod state;
mod web;

use crate::logging::{Verbosity, init_logging};
use crate::map::tiles_available;
use crate::state::AppState;
use anyhow::Context;
use axum::Router;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "uav-gcs", version, about = "Ground control station dashboard for a simulated UAV fleet")]
struct Cli {
    /// Dashboard config (JSON). Falls back to GCS_CONFIG_PATH, then the bundled file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address the web server listens on.
    #[arg(long, default_value = "0.0.0.0:3000")]
    bind: String,

    /// More logging (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Errors only.
    #[arg(short, long)]
    quiet: bool,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    let config = config::load_config(cli.config.as_deref()).context("loading dashboard config")?;
    tracing::info!(
        fleet = config.fleet.size,
        map = ?config.map.widget,
        "dashboard config loaded"
    );

    // Offline tiles are optional; fall back to online tiles when missing.
    let tiles_dir = match &config.map.tiles_dir {
        Some(dir) if tiles_available(dir).await => Some(dir.clone()),
        Some(dir) => {
            tracing::warn!(
                "no tiles found in {}, using OpenStreetMap tiles",
                dir.display()
            );
            None
        }
        None => None,
    };

    let state = Arc::new(AppState::new(config, tiles_dir));
    let app: Router = web::router(state);

    let listener = tokio::net::TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("binding {}", cli.bind))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
