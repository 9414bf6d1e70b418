//! Pet vitals: health and the dumpling tally.
//!
//! Health moves only through interactions; dumplings accrue while the pet is
//! in a productive mood. The poller owns one instance and feeds it elapsed
//! time, so accrual stays deterministic under test.

use dinopal_protocol::PetState;

const HEALTH_MAX: f64 = 100.0;
const SICK_THRESHOLD: f64 = 20.0;

const FEED_HEALTH_BONUS: f64 = 20.0;
const PET_HEALTH_BONUS: f64 = 10.0;

/// Dumplings earned per minute spent in a state.
fn earn_rate(state: PetState) -> f64 {
    match state {
        PetState::Coding => 2.0,
        PetState::Designing => 1.5,
        PetState::Working => 1.0,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PetVitals {
    pub health: f64,
    pub session_dumplings: f64,
    pub total_dumplings_earned: f64,
}

impl Default for PetVitals {
    fn default() -> Self {
        Self {
            health: HEALTH_MAX,
            session_dumplings: 0.0,
            total_dumplings_earned: 0.0,
        }
    }
}

impl PetVitals {
    pub fn feed(&mut self) {
        self.health = (self.health + FEED_HEALTH_BONUS).min(HEALTH_MAX);
    }

    pub fn pet(&mut self) {
        self.health = (self.health + PET_HEALTH_BONUS).min(HEALTH_MAX);
    }

    /// Credits dumplings for `elapsed_minutes` spent in `state`.
    pub fn accrue(&mut self, state: PetState, elapsed_minutes: f64) {
        let earned = earn_rate(state) * elapsed_minutes.max(0.0);
        if earned > 0.0 {
            self.session_dumplings += earned;
            self.total_dumplings_earned += earned;
        }
    }

    /// The state to report upstream: a very unhealthy pet reads as sick no
    /// matter what it is doing.
    pub fn reported_state(&self, current: PetState) -> PetState {
        if self.health < SICK_THRESHOLD {
            PetState::Sick
        } else {
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_full_health() {
        let vitals = PetVitals::default();
        assert_eq!(vitals.health, 100.0);
        assert_eq!(vitals.session_dumplings, 0.0);
    }

    #[test]
    fn feeding_and_petting_clamp_at_full() {
        let mut vitals = PetVitals {
            health: 95.0,
            ..Default::default()
        };
        vitals.feed();
        assert_eq!(vitals.health, 100.0);

        vitals.health = 30.0;
        vitals.pet();
        assert_eq!(vitals.health, 40.0);
    }

    #[test]
    fn coding_earns_fastest() {
        let mut vitals = PetVitals::default();
        vitals.accrue(PetState::Coding, 2.0);
        assert_eq!(vitals.session_dumplings, 4.0);
        assert_eq!(vitals.total_dumplings_earned, 4.0);

        vitals.accrue(PetState::Working, 1.0);
        assert_eq!(vitals.session_dumplings, 5.0);
    }

    #[test]
    fn idle_time_earns_nothing() {
        let mut vitals = PetVitals::default();
        vitals.accrue(PetState::Idle, 10.0);
        vitals.accrue(PetState::BrowsingSocial, 10.0);
        assert_eq!(vitals.total_dumplings_earned, 0.0);
    }

    #[test]
    fn negative_elapsed_is_ignored() {
        let mut vitals = PetVitals::default();
        vitals.accrue(PetState::Coding, -5.0);
        assert_eq!(vitals.total_dumplings_earned, 0.0);
    }

    #[test]
    fn low_health_reports_sick() {
        let mut vitals = PetVitals::default();
        vitals.health = 19.0;
        assert_eq!(vitals.reported_state(PetState::Coding), PetState::Sick);

        vitals.health = 20.0;
        assert_eq!(vitals.reported_state(PetState::Coding), PetState::Coding);
    }
}
