//! The presence poller: a single-threaded loop that samples the foreground
//! application, classifies it, and publishes the resulting mood.
//!
//! All state transitions live on [`PollerState`] and take explicit instants,
//! so the override/revert cycle is deterministic under test; the loop itself
//! only supplies clocks and I/O. Interactions arrive over a channel and are
//! handled on the loop thread, which keeps publication single-writer.

use pet_core::{classify, AppIdentity, Mood, PetVitals, Reaction, MOOD_IDLE, REACTION_HOLD};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::publisher::MoodPublisher;
use crate::reporter::SharedPresence;
use crate::workspace::WorkspaceAdapter;

pub struct PollerState {
    classified: Mood,
    override_until: Option<Instant>,
    last_tick: Option<Instant>,
    vitals: PetVitals,
}

impl Default for PollerState {
    fn default() -> Self {
        Self {
            classified: MOOD_IDLE,
            override_until: None,
            last_tick: None,
            vitals: PetVitals::default(),
        }
    }
}

impl PollerState {
    /// Runs one poll tick. Returns the mood to publish, or `None` while an
    /// interaction override holds the display.
    pub fn on_tick(&mut self, app: Option<&AppIdentity>, now: Instant) -> Option<Mood> {
        if let Some(previous) = self.last_tick {
            let elapsed_minutes = now.duration_since(previous).as_secs_f64() / 60.0;
            self.vitals.accrue(self.classified.state, elapsed_minutes);
        }
        self.last_tick = Some(now);

        self.classified = classify(app);

        if self.override_active(now) {
            None
        } else {
            Some(self.classified)
        }
    }

    /// Applies a manual interaction: bumps vitals and holds the reaction
    /// mood on the display. A second interaction restarts the hold.
    pub fn on_interaction(&mut self, reaction: Reaction, now: Instant) -> Mood {
        match reaction {
            Reaction::Feed => self.vitals.feed(),
            Reaction::Pet => self.vitals.pet(),
        }
        self.override_until = Some(now + REACTION_HOLD);
        reaction.mood()
    }

    /// If the override hold has elapsed, clears it and returns the revert
    /// target (the idle default, not the last classified mood).
    pub fn take_revert(&mut self, now: Instant) -> Option<Mood> {
        match self.override_until {
            Some(deadline) if now >= deadline => {
                self.override_until = None;
                Some(MOOD_IDLE)
            }
            _ => None,
        }
    }

    pub fn override_deadline(&self) -> Option<Instant> {
        self.override_until
    }

    fn override_active(&self, now: Instant) -> bool {
        self.override_until
            .map(|deadline| now < deadline)
            .unwrap_or(false)
    }

    pub fn vitals(&self) -> &PetVitals {
        &self.vitals
    }

    pub fn reported_state(&self) -> dinopal_protocol::PetState {
        self.vitals.reported_state(self.classified.state)
    }
}

/// Runs the poll loop until the interaction channel disconnects.
pub fn run(
    adapter: &dyn WorkspaceAdapter,
    publisher: &mut dyn MoodPublisher,
    interactions: Receiver<Reaction>,
    shared: &SharedPresence,
    interval: Duration,
) {
    let mut state = PollerState::default();
    let mut next_tick = Instant::now();

    loop {
        let now = Instant::now();
        let mut deadline = next_tick;
        if let Some(hold) = state.override_deadline() {
            if hold < deadline {
                deadline = hold;
            }
        }
        let wait = deadline.saturating_duration_since(now);

        match interactions.recv_timeout(wait) {
            Ok(reaction) => {
                let mood = state.on_interaction(reaction, Instant::now());
                publisher.publish(&mood);
                shared.update(state.reported_state(), state.vitals().clone());
            }
            Err(RecvTimeoutError::Timeout) => {
                let now = Instant::now();
                if let Some(mood) = state.take_revert(now) {
                    publisher.publish(&mood);
                }
                if now >= next_tick {
                    let app = match adapter.frontmost() {
                        Ok(app) => app,
                        Err(err) => {
                            warn!(error = %err, "Foreground query failed; treating as idle");
                            None
                        }
                    };
                    if let Some(mood) = state.on_tick(app.as_ref(), now) {
                        publisher.publish(&mood);
                    }
                    shared.update(state.reported_state(), state.vitals().clone());
                    next_tick = now + interval;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                info!("Interaction channel closed; poller shutting down");
                break;
            }
        }
    }
}
