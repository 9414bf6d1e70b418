//! Presence reporting: keeps the local user's row in the shared `users`
//! collection current.
//!
//! The poller owns the truth; this module holds a snapshot behind a mutex
//! and a reporter thread that periodically upserts it to the remote data
//! source. Failures are logged and dropped — the next cycle tries again with
//! fresh data. With no endpoint configured the reporter never starts.

use chrono::Utc;
use dinopal_protocol::{PetState, PresenceReport};
use pet_core::PetVitals;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
struct PresenceSnapshot {
    state: PetState,
    vitals: PetVitals,
}

/// Single-writer snapshot of what the agent would report right now.
#[derive(Clone)]
pub struct SharedPresence {
    inner: Arc<Mutex<PresenceSnapshot>>,
}

impl Default for SharedPresence {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(PresenceSnapshot {
                state: PetState::Idle,
                vitals: PetVitals::default(),
            })),
        }
    }
}

impl SharedPresence {
    pub fn update(&self, state: PetState, vitals: PetVitals) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.state = state;
            guard.vitals = vitals;
        }
    }

    fn report(&self, user_id: &str, username: &str) -> Option<PresenceReport> {
        let guard = self.inner.lock().ok()?;
        Some(PresenceReport {
            user_id: user_id.to_string(),
            username: username.to_string(),
            current_state: guard.state,
            health: guard.vitals.health,
            session_dumplings: guard.vitals.session_dumplings,
            total_dumplings_earned: guard.vitals.total_dumplings_earned,
            last_activity: Utc::now().to_rfc3339(),
        })
    }
}

pub struct ReporterConfig {
    pub endpoint: String,
    pub api_key: String,
    pub user_id: String,
    pub username: String,
    pub interval: Duration,
}

/// Spawns the reporter thread, or returns `None` when reporting is disabled.
pub fn spawn_reporter(
    shared: SharedPresence,
    config: ReporterConfig,
) -> Option<JoinHandle<()>> {
    if config.endpoint.trim().is_empty() {
        info!("No endpoint configured; presence reporting disabled");
        return None;
    }

    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            warn!(error = %err, "Failed to build report client; presence reporting disabled");
            return None;
        }
    };

    Some(thread::spawn(move || loop {
        thread::sleep(config.interval);
        let Some(report) = shared.report(&config.user_id, &config.username) else {
            continue;
        };
        send_report(&client, &config, &report);
    }))
}

fn send_report(
    client: &reqwest::blocking::Client,
    config: &ReporterConfig,
    report: &PresenceReport,
) {
    if let Err(err) = report.validate() {
        warn!(error = %err, "Skipping invalid presence report");
        return;
    }

    let url = format!("{}/rest/v1/users", config.endpoint.trim_end_matches('/'));
    let response = client
        .post(&url)
        .header("apikey", &config.api_key)
        .bearer_auth(&config.api_key)
        .header("Prefer", "resolution=merge-duplicates")
        .json(report)
        .send();

    match response {
        Ok(response) => {
            let status = response.status().as_u16();
            if response.status().is_success() {
                debug!(state = report.current_state.as_str(), "Presence report accepted");
            } else if status == 400 || status == 404 {
                // Backing table not provisioned yet; expected on fresh setups.
                debug!(status, "Data source not provisioned; report dropped");
            } else {
                warn!(status, "Presence report rejected");
            }
        }
        Err(err) => {
            warn!(error = %err, "Presence report failed to send");
        }
    }
}
