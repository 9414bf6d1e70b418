//! dinopal agent entrypoint.
//!
//! A small, single-writer service: one poll loop owns the displayed mood,
//! one reporter thread keeps the remote row current, and interactions come
//! in as lines on stdin ("feed" / "pet") from the menu-bar front-end.

use std::env;
use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pet_core::Reaction;

mod config;
mod poller;
mod publisher;
mod reporter;
mod workspace;

use config::{dinopal_dir, load_config, load_or_create_user_id};
use publisher::StatusFilePublisher;
use reporter::{spawn_reporter, ReporterConfig, SharedPresence};
use workspace::CommandWorkspaceAdapter;

const STATUS_FILE: &str = "status.json";

fn main() {
    init_logging();

    let dir = match dinopal_dir() {
        Ok(dir) => dir,
        Err(err) => {
            tracing::error!(error = %err, "Failed to resolve dinopal directory");
            std::process::exit(1);
        }
    };

    let config = match load_config(&dir) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Failed to load agent config");
            std::process::exit(1);
        }
    };

    let user_id = match load_or_create_user_id(&dir) {
        Ok(id) => id,
        Err(err) => {
            tracing::error!(error = %err, "Failed to establish user id");
            std::process::exit(1);
        }
    };

    info!(
        user_id = %user_id,
        username = %config.username,
        poll_interval_secs = config.poll_interval_secs,
        "dinopal agent started"
    );

    let shared = SharedPresence::default();
    let _reporter = spawn_reporter(
        shared.clone(),
        ReporterConfig {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            user_id,
            username: config.username.clone(),
            interval: Duration::from_secs(config.report_interval_secs),
        },
    );

    let (interaction_tx, interaction_rx) = mpsc::channel();
    // Keep one sender on this stack so a closed stdin doesn't stop the loop.
    let _keepalive = interaction_tx.clone();
    spawn_interaction_reader(interaction_tx);

    let adapter = CommandWorkspaceAdapter;
    let mut publisher = StatusFilePublisher::new(dir.join(STATUS_FILE));
    poller::run(
        &adapter,
        &mut publisher,
        interaction_rx,
        &shared,
        Duration::from_secs(config.poll_interval_secs),
    );
}

fn spawn_interaction_reader(sender: mpsc::Sender<Reaction>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };
            let reaction = match line.trim().to_lowercase().as_str() {
                "feed" => Reaction::Feed,
                "pet" => Reaction::Pet,
                "" => continue,
                other => {
                    warn!(command = other, "Unknown interaction");
                    continue;
                }
            };
            if sender.send(reaction).is_err() {
                break;
            }
        }
    });
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
