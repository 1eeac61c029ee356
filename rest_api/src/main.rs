// rest_api/src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rest_api::config::load_app_config;
use rest_api::{start_server, AppState};
use tracing_subscriber::EnvFilter;

/// Medase clinical-record REST API.
#[derive(Parser, Debug)]
#[command(name = "medase-api", version, about)]
struct Cli {
    /// Path to a YAML config file (defaults to ./medase_config.yaml when present).
    #[arg(long, env = "MEDASE_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "MEDASE_HOST")]
    host: Option<String>,
    #[arg(long, env = "MEDASE_PORT")]
    port: Option<u16>,
    /// Start with empty stores instead of the demo data.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = load_app_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.rest.host = host;
    }
    if let Some(port) = cli.port {
        config.rest.port = port;
    }
    if cli.no_seed {
        config.store.seed_demo_data = false;
    }

    let state = AppState::from_config(&config.store);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
        tracing::info!("Received shutdown signal.");
    };

    start_server(config, state, shutdown).await
}
