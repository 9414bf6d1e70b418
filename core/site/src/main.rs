//! dinopal community site entrypoint.
//!
//! Renders the shared pet community on a fixed refresh cadence. `--once`
//! runs a single refresh and exits, for cron-style use and smoke checks.

use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod config;
mod fetch;
mod refresh;
mod render;

use config::{default_config_path, load_config};
use fetch::HttpUserDirectory;
use render::ConsoleView;

#[derive(Parser)]
#[command(name = "dinopal-site", about = "Render the dinopal community dashboard")]
struct Cli {
    /// Path to the config file (defaults to ~/.dinopal/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run a single refresh and exit.
    #[arg(long)]
    once: bool,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let config_path = match cli.config.map(Ok).unwrap_or_else(default_config_path) {
        Ok(path) => path,
        Err(err) => {
            tracing::error!(error = %err, "Failed to resolve config path");
            std::process::exit(1);
        }
    };

    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Failed to load site config");
            std::process::exit(1);
        }
    };

    let directory = match HttpUserDirectory::new(config.endpoint.clone(), config.api_key.clone()) {
        Ok(directory) => directory,
        Err(err) => {
            tracing::error!(error = %err, "Failed to build fetch client");
            std::process::exit(1);
        }
    };

    info!(
        endpoint = %config.endpoint,
        refresh_interval_secs = config.refresh_interval_secs,
        "dinopal site started"
    );

    let mut view = ConsoleView;
    if cli.once {
        refresh::refresh_once(&directory, &mut view);
    } else {
        refresh::run(
            &directory,
            &mut view,
            Duration::from_secs(config.refresh_interval_secs),
        );
    }
}

fn init_logging() {
    let debug_enabled = env::var("DINOPAL_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    let filter = if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
