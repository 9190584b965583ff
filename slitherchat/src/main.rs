mod app;
mod chat;
mod config;
mod engine;
mod simulation;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::SlitherApp;
use clap::Parser;
use config::{AppConfig, SimulationConfig, window_conf};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for SlitherChat.
#[derive(Parser, Debug)]
#[command(name = "SlitherChat", version, about = "Chat-driven snake arena")]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible world.
    #[arg(long)]
    seed: Option<u64>,

    /// Feed the world from the built-in roster of simulated chatters.
    #[arg(long)]
    simulate_chat: bool,

    /// Start the world immediately instead of waiting for the Start button.
    #[arg(long)]
    autostart: bool,
}

/// Loads the simulation configuration from a TOML file or uses defaults.
fn load_config(path: Option<&PathBuf>) -> Result<SimulationConfig> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            let config: SimulationConfig = toml::from_str(&content)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            tracing::info!("Loaded config from '{}'", path.display());
            tracing::debug!(?config, "Config");
            Ok(config)
        }
        None => {
            tracing::info!("No config file provided, using defaults.");
            Ok(SimulationConfig::default())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn build_app_config(cli: &Cli) -> Result<AppConfig> {
    let simulation = load_config(cli.config.as_ref())?;
    let app_config =
        AppConfig::from_cli_and_config(cli, simulation).context("invalid configuration")?;
    Ok(app_config)
}

/// Main entry point for the SlitherChat application.
#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    match build_app_config(&cli) {
        Ok(app_config) => {
            let mut app = SlitherApp::new(app_config);
            app.run().await;
        }
        Err(e) => {
            tracing::error!("Error loading config: {e:#}");
        }
    }
}
