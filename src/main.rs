use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use flashdeck_lib::config::AppConfig;
use flashdeck_lib::{server, AppState};

#[derive(Parser)]
#[command(name = "flashdeck", about = "Flashdeck HTTP API server", version)]
struct Args {
    /// Path to a TOML config file (default: $FLASHDECK_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overriding the config (host:port)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let addr = args.bind.unwrap_or_else(|| config.bind_address());

    let state = AppState::from_config(&config).context("Failed to initialize application state")?;
    server::serve(Arc::new(state), &addr)
        .await
        .with_context(|| format!("Server on {} failed", addr))?;

    Ok(())
}
