//! Publishing the current mood to the display surface.
//!
//! The poller thread is the only writer. The production publisher keeps a
//! status file current for the menu-bar front-end to read; failures are
//! logged and the loop carries on with the previous file contents.

use chrono::Utc;
use dinopal_protocol::PetState;
use pet_core::Mood;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

pub trait MoodPublisher: Send {
    fn publish(&mut self, mood: &Mood);
}

#[derive(Serialize)]
struct StatusSnapshot<'a> {
    emoji: &'a str,
    status: &'a str,
    state: PetState,
    updated_at: String,
}

pub struct StatusFilePublisher {
    path: PathBuf,
}

impl StatusFilePublisher {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl MoodPublisher for StatusFilePublisher {
    fn publish(&mut self, mood: &Mood) {
        let snapshot = StatusSnapshot {
            emoji: mood.emoji,
            status: mood.status,
            state: mood.state,
            updated_at: Utc::now().to_rfc3339(),
        };

        let payload = match serde_json::to_vec_pretty(&snapshot) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "Failed to serialize mood snapshot");
                return;
            }
        };

        if let Err(err) = fs_err::write(&self.path, payload) {
            warn!(error = %err, path = %self.path.display(), "Failed to write status file");
            return;
        }

        debug!(emoji = mood.emoji, status = mood.status, "Mood published");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pet_core::MOOD_IDLE;

    #[test]
    fn writes_snapshot_json() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("status.json");
        let mut publisher = StatusFilePublisher::new(path.clone());

        publisher.publish(&MOOD_IDLE);

        let raw = fs_err::read_to_string(&path).expect("status file");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["emoji"], "🦕");
        assert_eq!(value["state"], "idle");
        assert!(value["updated_at"].as_str().is_some());
    }
}
